use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::config::DashboardConfig;
use crate::models::{Extracted, InventoryRow, InventoryTable};
use crate::parsers::{self, SheetGrid};
use crate::utils::date::{parse_cell_date, parse_cell_number};
use crate::utils::header::{find_col, find_scored_header_row};
use crate::utils::text::normalize_style_key;

/// (브랜드, 스타일)로 접은 중간 레코드 (등록 여부 조인 전)
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedStyle {
    pub brand: String,
    pub style: String,
    pub season: String,
    pub inbound: bool,
    pub outbound: bool,
}

/// 입출고 워크북 바이트에서 스타일 행을 추출
pub fn extract_inventory(bytes: &[u8], config: &DashboardConfig) -> Extracted<InventoryTable> {
    if bytes.is_empty() {
        return Extracted::Empty;
    }
    let sheets = match parsers::load_workbook(bytes) {
        Ok(sheets) => sheets,
        Err(_) => return Extracted::Empty,
    };
    match parsers::primary_sheet(&sheets) {
        Some(sheet) => extract_inventory_from_sheet(sheet, config),
        None => Extracted::Empty,
    }
}

/// 단일 워크시트 격자에서 스타일 행을 추출
///
/// # 처리의 흐름
/// 1. 키워드 점수로 헤더 행 탐지 (전부 0점이면 0행으로 폴백)
/// 2. 헤더에서 역할 열 탐지 (스타일 열은 필수)
/// 3. 행 단위로 플래그·금액을 계산하고 브랜드를 유도
pub fn extract_inventory_from_sheet(
    sheet: &SheetGrid,
    config: &DashboardConfig,
) -> Extracted<InventoryTable> {
    if sheet.rows.is_empty() {
        return Extracted::Empty;
    }

    let inv = &config.inventory;
    let header_idx =
        find_scored_header_row(&sheet.rows, &inv.header_keywords, config.inventory_scan_rows)
            .unwrap_or(0);
    let headers: Vec<String> = sheet.rows[header_idx]
        .iter()
        .map(|c| c.trim().to_string())
        .collect();

    let style_idx = match find_col(&headers, &inv.style) {
        Some(idx) => idx,
        // 스타일 열이 없으면 이 시트는 입출고 데이터가 아니다
        None => return Extracted::Empty,
    };
    let brand_idx = find_col(&headers, &inv.brand);
    let season_idx = find_col(&headers, &inv.season);
    let first_in_idx = find_col(&headers, &inv.first_inbound);
    let order_qty_idx = find_col(&headers, &inv.order_qty);
    let order_amt_idx = find_col(&headers, &inv.order_amount);
    let in_amt_idx = find_col(&headers, &inv.inbound_amount);
    let out_amt_idx = find_col(&headers, &inv.outbound_amount);
    let sale_amt_idx = find_col(&headers, &inv.sale_amount);

    let mut warnings = Vec::new();
    if first_in_idx.is_none() {
        warnings.push("최초입고일 열을 자동 판정하지 못했습니다.".to_string());
    }
    if out_amt_idx.is_none() {
        warnings.push("출고액 열을 자동 판정하지 못했습니다.".to_string());
    }
    if sale_amt_idx.is_none() {
        warnings.push("판매액 열을 자동 판정하지 못했습니다.".to_string());
    }

    let cell = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };
    let amount = |row: &[String], idx: Option<usize>| -> f64 {
        idx.and_then(|i| row.get(i))
            .and_then(|v| parse_cell_number(v))
            .unwrap_or(0.0)
    };

    let mut rows = Vec::new();
    for row in &sheet.rows[header_idx + 1..] {
        let style = cell(row, Some(style_idx));
        if style.is_empty() {
            continue;
        }

        let brand = {
            let explicit = cell(row, brand_idx);
            if explicit.is_empty() {
                config.brand_from_prefix(&style).map(|b| b.to_string())
            } else {
                Some(explicit)
            }
        };

        let first_inbound = first_in_idx
            .and_then(|i| row.get(i))
            .and_then(|v| parse_cell_date(v));
        let order_amount = amount(row, order_amt_idx);
        let inbound_amount = amount(row, in_amt_idx);
        let outbound_amount = amount(row, out_amt_idx);
        let sale_amount = amount(row, sale_amt_idx);

        rows.push(InventoryRow {
            season: cell(row, season_idx),
            inbound: first_inbound.is_some() || inbound_amount > 0.0,
            outbound: outbound_amount > 0.0,
            sold: sale_amount > 0.0,
            style,
            brand,
            first_inbound,
            order_amount,
            inbound_amount,
            outbound_amount,
            sale_amount,
        });
    }

    if rows.is_empty() {
        return Extracted::Empty;
    }
    Extracted::Found(InventoryTable {
        rows,
        has_order_qty: order_qty_idx.is_some(),
        warnings,
    })
}

/// (브랜드, 스타일) 단위로 접는다
///
/// 원시 시트는 사이즈·컬러 변형별로 같은 스타일이 여러 행 나올 수 있다.
/// 플래그는 행 전체의 OR, 시즌은 처음 나온 비어 있지 않은 값이다.
/// 브랜드를 유도하지 못한 행은 브랜드 단위 산출물에서 빠진다.
pub fn collapse_styles(table: &InventoryTable) -> Vec<CollapsedStyle> {
    let mut order: Vec<CollapsedStyle> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for row in &table.rows {
        let brand = match &row.brand {
            Some(b) => b.clone(),
            None => continue,
        };
        let key = (brand.clone(), row.style.clone());
        match index.get(&key) {
            Some(&i) => {
                let entry = &mut order[i];
                entry.inbound |= row.inbound;
                entry.outbound |= row.outbound;
                if entry.season.is_empty() && !row.season.is_empty() {
                    entry.season = row.season.clone();
                }
            }
            None => {
                index.insert(key, order.len());
                order.push(CollapsedStyle {
                    brand,
                    style: row.style.clone(),
                    season: row.season.clone(),
                    inbound: row.inbound,
                    outbound: row.outbound,
                });
            }
        }
    }

    order
}

/// 스타일코드(공백 제거) → 최초입고일(min) 맵. 평균 등록 소요일 계산용
pub fn first_inbound_map(table: &InventoryTable) -> HashMap<String, NaiveDateTime> {
    let mut map: HashMap<String, NaiveDateTime> = HashMap::new();
    for row in &table.rows {
        let date = match row.first_inbound {
            Some(d) => d,
            None => continue,
        };
        let key = normalize_style_key(&row.style);
        if key.is_empty() {
            continue;
        }
        map.entry(key)
            .and_modify(|existing| {
                if date < *existing {
                    *existing = date;
                }
            })
            .or_insert(date);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Extracted;

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid {
            name: "입출고".to_string(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn extract(sheet: &SheetGrid) -> InventoryTable {
        extract_inventory_from_sheet(sheet, &DashboardConfig::default())
            .found()
            .expect("추출 결과가 비어 있음")
    }

    #[test]
    fn test_header_detected_below_preamble() {
        let sheet = grid(&[
            &["2026년 입출고 현황"],
            &[""],
            &["브랜드", "스타일코드", "시즌", "최초입고일", "출고액"],
            &["스파오", "SPA001", "2", "2026-02-01", "1000"],
        ]);
        let table = extract(&sheet);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].style, "SPA001");
        assert!(table.rows[0].inbound);
        assert!(table.rows[0].outbound);
    }

    #[test]
    fn test_brand_derived_from_prefix() {
        let sheet = grid(&[
            &["스타일코드", "시즌", "최초입고일"],
            &["RM1234", "2", "45000"],
            &["zz999", "2", "45000"],
        ]);
        let table = extract(&sheet);
        assert_eq!(table.rows[0].brand.as_deref(), Some("로엠"));
        assert_eq!(table.rows[1].brand, None);
    }

    #[test]
    fn test_inbound_from_serial_or_amount() {
        let sheet = grid(&[
            &["스타일코드", "최초입고일", "누적입고액", "출고액"],
            &["SPA001", "45000", "0", "0"],
            &["SPA002", "", "5000", "0"],
            &["SPA003", "0", "0", "0"],
        ]);
        let table = extract(&sheet);
        assert!(table.rows[0].inbound);
        assert!(table.rows[1].inbound);
        // 0은 날짜가 아니므로 입고로 치지 않는다
        assert!(!table.rows[2].inbound);
    }

    #[test]
    fn test_order_qty_column_detection() {
        let with = grid(&[
            &["스타일코드", "발주 STY", "최초입고일"],
            &["SPA001", "120", "2026-02-01"],
        ]);
        assert!(extract(&with).has_order_qty);

        let without = grid(&[
            &["스타일코드", "최초입고일"],
            &["SPA001", "2026-02-01"],
        ]);
        assert!(!extract(&without).has_order_qty);
    }

    #[test]
    fn test_missing_style_column_is_empty() {
        let sheet = grid(&[&["메모", "비고"], &["a", "b"]]);
        assert_eq!(
            extract_inventory_from_sheet(&sheet, &DashboardConfig::default()),
            Extracted::Empty
        );
    }

    #[test]
    fn test_collapse_or_flags_and_first_season() {
        let sheet = grid(&[
            &["브랜드", "스타일코드", "시즌", "최초입고일", "출고액"],
            &["스파오", "SPA001", "", "", "1000"],
            &["스파오", "SPA001", "2", "2026-02-01", ""],
            &["스파오", "SPA001", "3", "", ""],
        ]);
        let collapsed = collapse_styles(&extract(&sheet));
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].season, "2");
        assert!(collapsed[0].inbound);
        assert!(collapsed[0].outbound);
    }

    #[test]
    fn test_first_inbound_map_takes_min() {
        let sheet = grid(&[
            &["브랜드", "스타일코드", "최초입고일"],
            &["스파오", "SP A001", "2026-02-10"],
            &["스파오", "SPA001", "2026-02-01"],
        ]);
        let map = first_inbound_map(&extract(&sheet));
        // 키는 공백 제거로 정규화되어 두 행이 같은 스타일이 된다
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("SPA001").map(|d| d.date().to_string()),
            Some("2026-02-01".to_string())
        );
    }
}
