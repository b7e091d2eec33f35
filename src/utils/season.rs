/// 시즌 셀 값 정규화
///
/// 원본 시트의 시즌 표기는 제각각이다(컬렉션 문자 + 숫자, 숫자 단독,
/// 엑셀이 실수로 바꿔 놓은 "7.0" 등). 기존 대시보드 산출물과의 호환을
/// 위해 관찰된 규칙을 그대로 재현한다:
///
/// 1. [1900, 2100] 범위의 정수는 연도 혼입으로 보고 빈 문자열
/// 2. 절대값 100 미만의 정수는 그 문자열 표현 그대로
/// 3. "시즌" 토큰과 공백을 제거한 뒤 ".0"으로 끝나고 그 앞이 숫자면
///    첫 글자(음수 부호면 둘째 글자)
/// 4. 빈 문자열이거나 3자리 이상의 숫자열이면 빈 문자열 (시즌일 수 없음)
/// 5. 대문자화 후, 두 글자 이상이고 첫 글자가 문자면 둘째 글자,
///    아니면 첫 글자
pub fn normalize_season(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(v) = trimmed.parse::<i64>() {
        if (1900..=2100).contains(&v) {
            return String::new();
        }
        if v > -100 && v < 100 {
            return v.to_string();
        }
        return String::new();
    }

    let stripped: String = trimmed
        .replace("시즌", "")
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    let s = stripped.trim();
    let chars: Vec<char> = s.chars().collect();

    if s.ends_with(".0") && chars.len() >= 2 {
        let digits: String = chars[..chars.len() - 2]
            .iter()
            .filter(|c| **c != '-')
            .collect();
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if chars[0] != '-' {
                return chars[0].to_string();
            }
            if chars.len() > 2 {
                return chars[1].to_string();
            }
            return String::new();
        }
    }

    if chars.is_empty() || (chars.len() >= 3 && chars.iter().all(|c| c.is_ascii_digit())) {
        return String::new();
    }

    let upper: Vec<char> = s.to_uppercase().chars().collect();
    if upper.len() >= 2 && upper[0].is_alphabetic() {
        return upper[1].to_string();
    }
    upper[0].to_string()
}

/// 선택 시즌 토큰들을 정규화하고 빈 값을 제거
pub fn normalize_selected(selected: &[String]) -> Vec<String> {
    selected
        .iter()
        .map(|s| normalize_season(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// 엄격 시즌 매칭: 트리밍·대문자화한 원본이 `^G?<token>$` 형태인지
///
/// 정규화 매칭만으로는 오탐이 생길 수 있어, 리드타임 필터는 이 엄격
/// 조건을 함께(AND) 요구한다.
pub fn strict_season_match(raw: &str, token: &str) -> bool {
    let s = raw.trim().to_uppercase();
    if s == token {
        return true;
    }
    match s.strip_prefix('G') {
        Some(rest) => rest == token,
        None => false,
    }
}

/// 전체 스타일 표의 시즌 필터: 선택 토큰과 같거나, 선택 토큰으로 시작하고
/// 바로 다음 글자가 영숫자가 아니면 포함 ("2", "2!", "2#"는 "2"에 매칭,
/// "22"는 제외)
pub fn season_prefix_matches(raw: &str, selected: &str) -> bool {
    let s = raw.trim();
    let sel = selected.trim();
    if s == sel {
        return true;
    }
    if let Some(rest) = s.strip_prefix(sel) {
        return match rest.chars().next() {
            Some(c) => !c.is_alphanumeric(),
            None => true,
        };
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_values_rejected() {
        assert_eq!(normalize_season("2024"), "");
        assert_eq!(normalize_season("1999"), "");
    }

    #[test]
    fn test_small_integers_kept() {
        assert_eq!(normalize_season("2"), "2");
        assert_eq!(normalize_season(" 7 "), "7");
        assert_eq!(normalize_season("22"), "22");
        assert_eq!(normalize_season("-5"), "-5");
        assert_eq!(normalize_season("150"), "");
    }

    #[test]
    fn test_excel_float_suffix() {
        assert_eq!(normalize_season("7.0"), "7");
        assert_eq!(normalize_season("-7.0"), "7");
        assert_eq!(normalize_season("27.0"), "2");
    }

    #[test]
    fn test_season_word_stripped() {
        assert_eq!(normalize_season("2 시즌"), "2");
        assert_eq!(normalize_season("시즌"), "");
    }

    #[test]
    fn test_letter_prefix_takes_second_char() {
        assert_eq!(normalize_season("G2"), "2");
        assert_eq!(normalize_season("g2"), "2");
        assert_eq!(normalize_season("F"), "F");
        assert_eq!(normalize_season("123"), "");
    }

    #[test]
    fn test_strict_season_match() {
        assert!(strict_season_match("G2", "2"));
        assert!(strict_season_match("2", "2"));
        assert!(strict_season_match(" g2 ", "2"));
        assert!(!strict_season_match("22", "2"));
        assert!(!strict_season_match("H2", "2"));
        assert!(!strict_season_match("G22", "2"));
    }

    #[test]
    fn test_season_prefix_matches() {
        assert!(season_prefix_matches("2", "2"));
        assert!(season_prefix_matches("2!", "2"));
        assert!(season_prefix_matches("2#", "2"));
        assert!(season_prefix_matches("2!#", "2"));
        assert!(!season_prefix_matches("22", "2"));
        assert!(!season_prefix_matches("A2", "2"));
    }
}
