//! 브랜드별 스타일 입출고·온라인등록 모니터링 코어
//!
//! 원격 스프레드시트 내보내기 바이트를 받아 헤더 탐지, 날짜·시즌 정규화,
//! 스타일 집계, 등록 모니터링 표 산출까지를 담당한다. 네트워크·화면은
//! 호출측 몫이다.

use std::collections::HashMap;

pub mod aggregate;
pub mod config;
pub mod exporters;
pub mod extractors;
pub mod fetch;
pub mod models;
pub mod parsers;
pub mod utils;

pub use config::DashboardConfig;
pub use fetch::{CachedFetcher, Clock, SheetSource, SourceMap, SystemClock};
pub use models::{AppError, Dashboard, Extracted};

use models::RegisterTable;

/// 소스 묶음 하나로 대시보드 산출물 전체를 만든다
///
/// 입출고 소스가 없거나 비어 있으면 빈 대시보드를 돌려준다. 브랜드별
/// 등록 소스는 없어도 진행하며, 해당 브랜드의 스타일은 미등록으로 남는다.
pub fn build_dashboard(
    sources: &SourceMap,
    config: &DashboardConfig,
    selected_seasons: Option<&[String]>,
) -> Dashboard {
    let inout_bytes = match sources.get(&config.inout_key) {
        Some(Some(bytes)) => bytes,
        _ => return Dashboard::default(),
    };
    let inventory = match extractors::extract_inventory(inout_bytes, config) {
        Extracted::Found(table) => table,
        Extracted::Empty => return Dashboard::default(),
    };

    // 브랜드별 등록 시트 추출. 소스가 없으면 Empty로 둔다
    let mut registers: HashMap<String, Extracted<RegisterTable>> = HashMap::new();
    for key in config.brand_keys.values() {
        let extracted = match sources.get(key) {
            Some(Some(bytes)) => {
                let target = config.register_sheet_names.get(key).map(|s| s.as_str());
                extractors::extract_register(bytes, config, target)
            }
            _ => Extracted::Empty,
        };
        registers.insert(key.clone(), extracted);
    }

    assemble_dashboard(&inventory, &registers, config, selected_seasons)
}

/// 추출이 끝난 테이블들을 최종 산출물로 조립한다
fn assemble_dashboard(
    inventory: &models::InventoryTable,
    registers: &HashMap<String, Extracted<RegisterTable>>,
    config: &DashboardConfig,
    selected_seasons: Option<&[String]>,
) -> Dashboard {
    let styles = aggregate::build_style_table(inventory, registers, config);
    let brand_rollups = aggregate::brand_rollups(inventory, config);
    let brand_season_rollups = aggregate::brand_season_rollups(inventory);

    let first_inbound = extractors::first_inbound_map(inventory);
    let mut avg_days: HashMap<String, Option<f64>> = HashMap::new();
    for brand in &config.brands {
        let avg = if config.is_no_register_brand(brand) {
            None
        } else {
            config
                .brand_key(brand)
                .and_then(|key| registers.get(key))
                .and_then(|extracted| extracted.as_ref().found())
                .and_then(|table| {
                    aggregate::register_avg_days(table, &first_inbound, selected_seasons)
                })
        };
        avg_days.insert(brand.clone(), avg);
    }

    let monitor = aggregate::build_register_monitor(&styles, &avg_days, selected_seasons, config);

    Dashboard {
        styles,
        brand_rollups,
        brand_season_rollups,
        monitor,
        warnings: inventory.warnings.clone(),
    }
}
