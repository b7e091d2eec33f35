use crate::config::DashboardConfig;
use crate::models::{Extracted, RegisterRecord, RegisterTable, RegistrationStatus};
use crate::parsers::{self, SheetGrid};
use crate::utils::date::parse_cell_date;
use crate::utils::header::{find_col_containing, find_required_header_row};
use crate::utils::text::is_missing_token;

/// 브랜드 등록 워크북에서 (스타일, 시즌, 등록일) 레코드를 추출
///
/// `target_sheet`가 지정되면 그 워크시트만 탐색한다. 어떤 워크시트에도
/// 필수 헤더(스타일코드 + 공홈등록일)가 없으면 `Empty`를 돌려주며, 이는
/// 오류가 아니라 "등록 데이터 없음"이다.
pub fn extract_register(
    bytes: &[u8],
    config: &DashboardConfig,
    target_sheet: Option<&str>,
) -> Extracted<RegisterTable> {
    if bytes.is_empty() {
        return Extracted::Empty;
    }
    let sheets = match parsers::load_workbook(bytes) {
        Ok(sheets) => sheets,
        Err(_) => return Extracted::Empty,
    };
    extract_register_from_sheets(&sheets, config, target_sheet)
}

/// 워크시트들을 순서대로 탐색해 처음으로 필수 헤더를 가진 시트를 쓴다
pub fn extract_register_from_sheets(
    sheets: &[SheetGrid],
    config: &DashboardConfig,
    target_sheet: Option<&str>,
) -> Extracted<RegisterTable> {
    let reg = &config.register;

    for sheet in sheets {
        if let Some(name) = target_sheet {
            if sheet.name != name {
                continue;
            }
        }

        let (header_idx, norm_headers) = match find_required_header_row(
            &sheet.rows,
            &reg.style_code,
            &reg.register_date,
            config.register_scan_rows,
        ) {
            Some(found) => found,
            None => continue,
        };

        let style_idx = find_col_containing(&norm_headers, &reg.style_code)
            .or_else(|| find_col_containing(&norm_headers, &reg.style_fallback));
        let regdate_idx = find_col_containing(&norm_headers, &reg.register_date);
        let (style_idx, regdate_idx) = match (style_idx, regdate_idx) {
            (Some(s), Some(r)) => (s, r),
            _ => continue,
        };
        let season_idx = reg
            .season
            .iter()
            .find_map(|k| find_col_containing(&norm_headers, k));
        let photo_idx = reg
            .photo_handover
            .iter()
            .find_map(|k| find_col_containing(&norm_headers, k));
        let retouch_idx = reg
            .retouch_complete
            .iter()
            .find_map(|k| find_col_containing(&norm_headers, k));

        fn cell(row: &[String], idx: usize) -> &str {
            row.get(idx).map(|v| v.as_str()).unwrap_or("")
        }

        let mut rows = Vec::new();
        for row in &sheet.rows[header_idx + 1..] {
            let style = cell(row, style_idx).trim().to_string();
            if is_missing_token(&style) {
                continue;
            }
            let register_date = parse_cell_date(cell(row, regdate_idx));
            let status = if register_date.is_some() {
                RegistrationStatus::Registered
            } else {
                RegistrationStatus::Unregistered
            };
            rows.push(RegisterRecord {
                style,
                season: season_idx.map(|i| cell(row, i).trim().to_string()).unwrap_or_default(),
                register_date,
                photo_handover_date: photo_idx.and_then(|i| parse_cell_date(cell(row, i))),
                retouch_complete_date: retouch_idx.and_then(|i| parse_cell_date(cell(row, i))),
                status,
            });
        }

        return Extracted::Found(RegisterTable {
            sheet_name: sheet.name.clone(),
            rows,
        });
    }

    Extracted::Empty
}
