use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 스프레드시트 일련번호 날짜의 기점 (1899-12-30)
fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// 일련번호로 해석할 숫자 범위. 60000일 ≈ 2064년으로, 업무 데이터의
/// 날짜가 아닌 큰 숫자 코드를 날짜로 오인하지 않기 위한 상한
const SERIAL_MIN: f64 = 1.0;
const SERIAL_MAX: f64 = 60000.0;

/// 셀 문자열을 숫자로 파싱 (실패 시 None)
pub fn parse_cell_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// 일련번호(기점으로부터의 일수)를 날짜로 변환
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let epoch = serial_epoch()?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// 혼재된 셀 값을 날짜로 판별한다
///
/// - 0 또는 "0"은 항상 None (기점 날짜가 아님)
/// - [1, 60000] 범위의 숫자는 일련번호로 해석하며, 문자열 날짜 파싱보다
///   우선한다
/// - 날짜 문자열로 파싱되면 그 값을 사용
/// - 그 외에는 None
pub fn parse_cell_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(num) = parse_cell_number(trimmed) {
        if num == 0.0 {
            return None;
        }
        if (SERIAL_MIN..=SERIAL_MAX).contains(&num) {
            return serial_to_datetime(num);
        }
        // 범위 밖 숫자는 문자열 날짜 파싱으로 폴백 (예: 20240105)
    }
    parse_date_string(trimmed)
}

fn parse_date_string(value: &str) -> Option<NaiveDateTime> {
    // 8자리 숫자는 YYYYMMDD로 직접 해석
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = value[0..4].parse().ok()?;
        let month: u32 = value[4..6].parse().ok()?;
        let day: u32 = value[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0);
    }

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}
