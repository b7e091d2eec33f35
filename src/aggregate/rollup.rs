use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::DashboardConfig;
use crate::extractors::inventory::collapse_styles;
use crate::models::{
    BrandRollup, BrandSeasonRollup, Extracted, InventoryRow, InventoryTable, RegisterMonitorRow,
    RegisterTable, RegistrationStatus, StyleRecord,
};
use crate::utils::season::season_prefix_matches;
use crate::utils::text::normalize_style_key;

/// 스타일 표 조인: (브랜드, 스타일) 집계에 등록 여부를 붙인다
///
/// 조인 키는 공백을 제거한 스타일코드. 등록 시트에 같은 스타일이 여러 번
/// 나오면 첫 행이 이긴다. 매칭이 없거나 브랜드에 등록 시트가 없으면
/// 미등록이다.
pub fn build_style_table(
    inventory: &InventoryTable,
    registers: &HashMap<String, Extracted<RegisterTable>>,
    config: &DashboardConfig,
) -> Vec<StyleRecord> {
    // 소스 키 → (정규화 스타일 → 등록 여부), 첫 행 우선
    let mut lookup: HashMap<&str, HashMap<String, RegistrationStatus>> = HashMap::new();
    for (key, extracted) in registers {
        if let Extracted::Found(table) = extracted {
            let map = lookup.entry(key.as_str()).or_default();
            for record in &table.rows {
                map.entry(normalize_style_key(&record.style))
                    .or_insert(record.status);
            }
        }
    }

    collapse_styles(inventory)
        .into_iter()
        .map(|collapsed| {
            let registration = config
                .brand_key(&collapsed.brand)
                .and_then(|key| lookup.get(key))
                .and_then(|map| map.get(&normalize_style_key(&collapsed.style)))
                .copied()
                .unwrap_or(RegistrationStatus::Unregistered);
            StyleRecord {
                brand: collapsed.brand,
                style_code: collapsed.style,
                season: collapsed.season,
                inbound: collapsed.inbound,
                outbound: collapsed.outbound,
                registration,
            }
        })
        .collect()
}

#[derive(Default)]
struct Measures {
    ordered_styles: HashSet<String>,
    ordered_amount: f64,
    inbound_styles: HashSet<String>,
    inbound_amount: f64,
    outbound_styles: HashSet<String>,
    outbound_amount: f64,
    sold_styles: HashSet<String>,
    sold_amount: f64,
}

impl Measures {
    /// 금액은 해당 조건을 만족하는 행만 합산한다 (전체 행 합산 금지)
    fn add(&mut self, row: &InventoryRow) {
        self.ordered_styles.insert(row.style.clone());
        self.ordered_amount += row.order_amount;
        if row.inbound {
            self.inbound_styles.insert(row.style.clone());
            self.inbound_amount += row.inbound_amount;
        }
        if row.outbound {
            self.outbound_styles.insert(row.style.clone());
            self.outbound_amount += row.outbound_amount;
        }
        if row.sold {
            self.sold_styles.insert(row.style.clone());
            self.sold_amount += row.sale_amount;
        }
    }
}

/// 브랜드 단위 입출고 집계. 행 순서는 BU 그룹의 브랜드 순서이며,
/// 데이터가 없는 브랜드도 0으로 내보낸다. 발주 수량 열이 없는 시트는
/// 발주 STY수를 0으로 낸다
pub fn brand_rollups(inventory: &InventoryTable, config: &DashboardConfig) -> Vec<BrandRollup> {
    let mut by_brand: HashMap<&str, Measures> = HashMap::new();
    for row in &inventory.rows {
        if let Some(brand) = &row.brand {
            by_brand.entry(brand.as_str()).or_default().add(row);
        }
    }

    let empty = Measures::default();
    config
        .bu_groups
        .iter()
        .flat_map(|group| group.brands.iter())
        .map(|brand| {
            let m = by_brand.get(brand.as_str()).unwrap_or(&empty);
            BrandRollup {
                brand: brand.clone(),
                ordered_styles: if inventory.has_order_qty {
                    m.ordered_styles.len()
                } else {
                    0
                },
                ordered_amount: m.ordered_amount,
                inbound_styles: m.inbound_styles.len(),
                inbound_amount: m.inbound_amount,
                outbound_styles: m.outbound_styles.len(),
                outbound_amount: m.outbound_amount,
                sold_styles: m.sold_styles.len(),
                sold_amount: m.sold_amount,
            }
        })
        .collect()
}

/// (브랜드, 시즌) 단위 집계. 브랜드 행 펼침용으로 키 순 정렬
pub fn brand_season_rollups(inventory: &InventoryTable) -> Vec<BrandSeasonRollup> {
    let mut by_key: BTreeMap<(String, String), Measures> = BTreeMap::new();
    for row in &inventory.rows {
        if let Some(brand) = &row.brand {
            by_key
                .entry((brand.clone(), row.season.clone()))
                .or_default()
                .add(row);
        }
    }

    by_key
        .into_iter()
        .map(|((brand, season), m)| BrandSeasonRollup {
            brand,
            season,
            ordered_styles: if inventory.has_order_qty {
                m.ordered_styles.len()
            } else {
                0
            },
            ordered_amount: m.ordered_amount,
            inbound_styles: m.inbound_styles.len(),
            inbound_amount: m.inbound_amount,
            outbound_styles: m.outbound_styles.len(),
            outbound_amount: m.outbound_amount,
            sold_styles: m.sold_styles.len(),
            sold_amount: m.sold_amount,
        })
        .collect()
}

/// 전체 스타일 표의 시즌 필터 (선택이 없으면 그대로)
pub fn filter_styles_by_season(styles: &[StyleRecord], selected: &[String]) -> Vec<StyleRecord> {
    if selected.is_empty() {
        return styles.to_vec();
    }
    styles
        .iter()
        .filter(|r| selected.iter().any(|sel| season_prefix_matches(&r.season, sel)))
        .cloned()
        .collect()
}

/// 브랜드별 상품등록 모니터링 표
///
/// 입고된 스타일만 모수로 삼고, 그 중 온라인 등록된 스타일을 센다.
/// 스타일수는 (브랜드, 시즌, 스타일) 중복 제거 후의 고유 개수다.
/// 등록 시트가 없는 브랜드는 등록 수치가 None으로 나간다.
pub fn build_register_monitor(
    styles: &[StyleRecord],
    avg_days: &HashMap<String, Option<f64>>,
    selected_seasons: Option<&[String]>,
    config: &DashboardConfig,
) -> Vec<RegisterMonitorRow> {
    let filtered = match selected_seasons {
        Some(selected) if !selected.is_empty() => filter_styles_by_season(styles, selected),
        _ => styles.to_vec(),
    };

    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut inbound: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut registered: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in &filtered {
        if !seen.insert((
            record.brand.clone(),
            record.season.clone(),
            record.style_code.clone(),
        )) {
            continue;
        }
        if !record.inbound {
            continue;
        }
        inbound
            .entry(record.brand.as_str())
            .or_default()
            .insert(record.style_code.as_str());
        if record.registration == RegistrationStatus::Registered {
            registered
                .entry(record.brand.as_str())
                .or_default()
                .insert(record.style_code.as_str());
        }
    }

    config
        .brands
        .iter()
        .map(|brand| {
            let in_count = inbound.get(brand.as_str()).map(|s| s.len()).unwrap_or(0);
            let no_register = config.is_no_register_brand(brand);
            let reg_count = if no_register {
                0
            } else {
                registered.get(brand.as_str()).map(|s| s.len()).unwrap_or(0)
            };
            let rate = if no_register {
                None
            } else {
                Some(reg_count as f64 / in_count.max(1) as f64)
            };
            RegisterMonitorRow {
                brand: brand.clone(),
                inbound_styles: in_count,
                registered_styles: reg_count,
                unregistered_styles: in_count.saturating_sub(reg_count),
                registration_rate: rate,
                avg_register_days: if no_register {
                    None
                } else {
                    avg_days.get(brand).copied().flatten()
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(brand: &str, style: &str, season: &str, inbound: bool, outbound: bool) -> InventoryRow {
        InventoryRow {
            style: style.to_string(),
            brand: Some(brand.to_string()),
            season: season.to_string(),
            first_inbound: None,
            inbound,
            outbound,
            sold: false,
            order_amount: 0.0,
            inbound_amount: 0.0,
            outbound_amount: if outbound { 100.0 } else { 0.0 },
            sale_amount: 0.0,
        }
    }

    #[test]
    fn test_outbound_count_is_distinct_styles() {
        // 같은 스타일의 변형 3행 중 2행이 출고여도 출고 STY수는 1
        let table = InventoryTable {
            rows: vec![
                row("스파오", "SPA001", "2", true, true),
                row("스파오", "SPA001", "2", true, true),
                row("스파오", "SPA001", "2", true, false),
            ],
            has_order_qty: true,
            warnings: vec![],
        };
        let rollups = brand_rollups(&table, &DashboardConfig::default());
        let spao = rollups.iter().find(|r| r.brand == "스파오").unwrap();
        assert_eq!(spao.outbound_styles, 1);
        assert_eq!(spao.ordered_styles, 1);
        // 금액은 조건을 만족하는 행만 합산
        assert_eq!(spao.outbound_amount, 200.0);
    }

    #[test]
    fn test_ordered_count_requires_order_qty_column() {
        // 발주 수량 열이 없는 시트: 발주액은 합산하되 발주 STY수는 0
        let table = InventoryTable {
            rows: vec![row("스파오", "SPA001", "2", true, false)],
            has_order_qty: false,
            warnings: vec![],
        };
        let rollups = brand_rollups(&table, &DashboardConfig::default());
        let spao = rollups.iter().find(|r| r.brand == "스파오").unwrap();
        assert_eq!(spao.ordered_styles, 0);
        assert_eq!(spao.inbound_styles, 1);

        let seasonal = brand_season_rollups(&table);
        assert_eq!(seasonal[0].ordered_styles, 0);
    }

    #[test]
    fn test_rollup_includes_zero_brands() {
        let table = InventoryTable {
            rows: vec![row("스파오", "SPA001", "2", true, false)],
            has_order_qty: true,
            warnings: vec![],
        };
        let rollups = brand_rollups(&table, &DashboardConfig::default());
        let roem = rollups.iter().find(|r| r.brand == "로엠").unwrap();
        assert_eq!(roem.inbound_styles, 0);
        assert_eq!(roem.inbound_amount, 0.0);
    }

    #[test]
    fn test_brand_season_rollups_keyed() {
        let table = InventoryTable {
            rows: vec![
                row("스파오", "SPA001", "1", true, false),
                row("스파오", "SPA002", "2", true, false),
                row("로엠", "RM0001", "1", false, true),
            ],
            has_order_qty: true,
            warnings: vec![],
        };
        let rollups = brand_season_rollups(&table);
        assert_eq!(rollups.len(), 3);
        let spao1 = rollups
            .iter()
            .find(|r| r.brand == "스파오" && r.season == "1")
            .unwrap();
        assert_eq!(spao1.inbound_styles, 1);
    }

    #[test]
    fn test_unmatched_style_defaults_to_unregistered() {
        let table = InventoryTable {
            rows: vec![row("스파오", "SPA001", "2", true, false)],
            has_order_qty: true,
            warnings: vec![],
        };
        // 등록 시트가 아예 없는 경우
        let styles = build_style_table(&table, &HashMap::new(), &DashboardConfig::default());
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].registration, RegistrationStatus::Unregistered);
    }

    #[test]
    fn test_monitor_counts_unregistered() {
        let config = DashboardConfig::default();
        let styles = vec![
            StyleRecord {
                brand: "스파오".to_string(),
                style_code: "SPA001".to_string(),
                season: "2".to_string(),
                inbound: true,
                outbound: false,
                registration: RegistrationStatus::Registered,
            },
            StyleRecord {
                brand: "스파오".to_string(),
                style_code: "SPA002".to_string(),
                season: "2".to_string(),
                inbound: true,
                outbound: false,
                registration: RegistrationStatus::Unregistered,
            },
            StyleRecord {
                brand: "스파오".to_string(),
                style_code: "SPA003".to_string(),
                season: "2".to_string(),
                inbound: false,
                outbound: false,
                registration: RegistrationStatus::Unregistered,
            },
        ];
        let monitor = build_register_monitor(&styles, &HashMap::new(), None, &config);
        let spao = monitor.iter().find(|r| r.brand == "스파오").unwrap();
        // 미등록 스타일은 집계에서 빠지지 않고 미등록수에 반영된다
        assert_eq!(spao.inbound_styles, 2);
        assert_eq!(spao.registered_styles, 1);
        assert_eq!(spao.unregistered_styles, 1);
        assert_eq!(spao.registration_rate, Some(0.5));
    }

    #[test]
    fn test_monitor_no_register_brand_has_none() {
        let config = DashboardConfig::default();
        let monitor = build_register_monitor(&[], &HashMap::new(), None, &config);
        let nb = monitor.iter().find(|r| r.brand == "뉴발란스").unwrap();
        assert_eq!(nb.registration_rate, None);
        assert_eq!(nb.avg_register_days, None);
    }

    #[test]
    fn test_season_filter_on_styles() {
        let styles = vec![
            StyleRecord {
                brand: "스파오".to_string(),
                style_code: "SPA001".to_string(),
                season: "2!".to_string(),
                inbound: true,
                outbound: false,
                registration: RegistrationStatus::Unregistered,
            },
            StyleRecord {
                brand: "스파오".to_string(),
                style_code: "SPA002".to_string(),
                season: "22".to_string(),
                inbound: true,
                outbound: false,
                registration: RegistrationStatus::Unregistered,
            },
        ];
        let filtered = filter_styles_by_season(&styles, &["2".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].style_code, "SPA001");
    }
}
