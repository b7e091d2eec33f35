mod excel;

pub use excel::load_workbook;

/// 워크시트 하나의 원시 격자 (셀은 전부 문자열로 정규화)
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// 입출고 데이터가 들어 있는 기본 워크시트 선택
///
/// "_"로 시작하는 시트(작업용)는 제외하고 첫 시트, 전부 제외되면
/// 마지막 시트를 쓴다.
pub fn primary_sheet(sheets: &[SheetGrid]) -> Option<&SheetGrid> {
    sheets
        .iter()
        .find(|s| !s.name.starts_with('_'))
        .or_else(|| sheets.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_sheet_skips_underscore() {
        let sheets = vec![
            SheetGrid {
                name: "_작업".to_string(),
                rows: vec![],
            },
            SheetGrid {
                name: "입출고".to_string(),
                rows: vec![],
            },
        ];
        assert_eq!(primary_sheet(&sheets).map(|s| s.name.as_str()), Some("입출고"));
    }

    #[test]
    fn test_primary_sheet_falls_back_to_last() {
        let sheets = vec![
            SheetGrid {
                name: "_a".to_string(),
                rows: vec![],
            },
            SheetGrid {
                name: "_b".to_string(),
                rows: vec![],
            },
        ];
        assert_eq!(primary_sheet(&sheets).map(|s| s.name.as_str()), Some("_b"));
    }

    #[test]
    fn test_primary_sheet_empty() {
        assert!(primary_sheet(&[]).is_none());
    }
}
