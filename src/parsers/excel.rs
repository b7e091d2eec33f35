use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, DataType, Reader};

use crate::models::AppError;

use super::SheetGrid;

/// 워크북 바이트를 워크시트별 문자열 격자로 변환
pub fn load_workbook(bytes: &[u8]) -> Result<Vec<SheetGrid>, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| AppError::new(format!("워크북 읽기에 실패했습니다: {err}")))?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        // 해석할 수 없는 워크시트는 건너뛴다
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(_) => continue,
        };
        let rows = range
            .rows()
            .map(|row| row.iter().map(data_type_to_string).collect())
            .collect();
        sheets.push(SheetGrid { name, rows });
    }

    Ok(sheets)
}

fn data_type_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        DataType::Int(v) => v.to_string(),
        DataType::Bool(v) => v.to_string(),
        // 날짜 셀은 일자 문자열로 풀어서 이후 날짜 판별이 처리하게 한다
        DataType::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        DataType::DateTimeIso(s) => s.trim().to_string(),
        DataType::Error(_) => String::new(),
        _ => cell.to_string(),
    }
}
