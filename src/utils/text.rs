/// 모든 공백(내부 포함)을 제거한다. 열 이름 비교·스타일코드 조인 키에 사용
pub fn squash_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// 스타일코드 조인 키 정규화
pub fn normalize_style_key(raw: &str) -> String {
    squash_whitespace(raw)
}

/// 스프레드시트 내보내기에서 결측 셀로 쓰이는 토큰인지 판정
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}
