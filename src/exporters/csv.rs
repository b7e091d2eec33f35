use crate::models::{AppError, BrandRollup, StyleRecord};
use csv::WriterBuilder;

fn flag(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let data = writer
        .into_inner()
        .map_err(|e| AppError::new(format!("CSV 버퍼 회수 오류: {}", e)))?;
    let csv_string =
        String::from_utf8(data).map_err(|e| AppError::new(format!("UTF-8 변환 오류: {}", e)))?;

    // 엑셀에서 한글이 깨지지 않도록 UTF-8 BOM을 붙인다
    Ok(format!("\u{FEFF}{}", csv_string))
}

/// 스타일 테이블 CSV 내보내기
pub fn export_style_table_csv(styles: &[StyleRecord]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record([
            "브랜드",
            "스타일코드",
            "시즌",
            "입고 여부",
            "출고 여부",
            "온라인상품등록여부",
        ])
        .map_err(|e| AppError::new(format!("CSV 쓰기 오류: {}", e)))?;

    for record in styles {
        writer
            .write_record([
                record.brand.as_str(),
                record.style_code.as_str(),
                record.season.as_str(),
                flag(record.inbound),
                flag(record.outbound),
                record.registration.label(),
            ])
            .map_err(|e| AppError::new(format!("CSV 쓰기 오류: {}", e)))?;
    }

    finish(writer)
}

/// 브랜드 집계 CSV 내보내기. 금액은 소수점 없이 원 단위로 적는다
pub fn export_brand_rollup_csv(rollups: &[BrandRollup]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record([
            "브랜드",
            "발주 STY수",
            "발주액",
            "입고 STY수",
            "입고액",
            "출고 STY수",
            "출고액",
            "판매 STY수",
            "판매액",
        ])
        .map_err(|e| AppError::new(format!("CSV 쓰기 오류: {}", e)))?;

    for rollup in rollups {
        writer
            .write_record([
                rollup.brand.clone(),
                rollup.ordered_styles.to_string(),
                format!("{:.0}", rollup.ordered_amount),
                rollup.inbound_styles.to_string(),
                format!("{:.0}", rollup.inbound_amount),
                rollup.outbound_styles.to_string(),
                format!("{:.0}", rollup.outbound_amount),
                rollup.sold_styles.to_string(),
                format!("{:.0}", rollup.sold_amount),
            ])
            .map_err(|e| AppError::new(format!("CSV 쓰기 오류: {}", e)))?;
    }

    finish(writer)
}
