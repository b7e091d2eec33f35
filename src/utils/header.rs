use crate::utils::text::squash_whitespace;

/// 한 행이 헤더일 가능성 점수: 키워드 중 하나라도 포함하는 셀의 개수
///
/// 키워드 매칭은 원본 셀 문자열에 대한 부분 문자열 검사다. 키워드 집합은
/// 설정에서 주입되므로 매칭 로직 자체는 언어 중립이다.
pub fn keyword_hit_score(row: &[String], keywords: &[String]) -> usize {
    row.iter()
        .filter(|cell| keywords.iter().any(|k| cell.contains(k.as_str())))
        .count()
}

/// 입출고 시트의 헤더 행 탐지
///
/// 스캔 범위 내에서 점수가 가장 높은 행을 고른다. 동점이면 먼저 나온 행,
/// 점수가 전부 0이면 None (호출측이 0행 헤더로 폴백).
pub fn find_scored_header_row(
    rows: &[Vec<String>],
    keywords: &[String],
    scan_limit: usize,
) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (idx, row) in rows.iter().take(scan_limit).enumerate() {
        let score = keyword_hit_score(row, keywords);
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

/// 등록 시트의 헤더 행 탐지
///
/// 공백 제거한 셀들 중에 필수 키워드 두 개가 모두 (각각 어느 셀에든)
/// 부분 문자열로 존재하는 첫 행을 찾는다. 발견 시 (행 번호, 정규화된
/// 헤더 셀들)을 돌려준다.
pub fn find_required_header_row(
    rows: &[Vec<String>],
    required_a: &str,
    required_b: &str,
    scan_limit: usize,
) -> Option<(usize, Vec<String>)> {
    for (idx, row) in rows.iter().take(scan_limit).enumerate() {
        let norm: Vec<String> = row.iter().map(|c| squash_whitespace(c)).collect();
        let has_a = norm.iter().any(|c| c.contains(required_a));
        let has_b = norm.iter().any(|c| c.contains(required_b));
        if has_a && has_b {
            return Some((idx, norm));
        }
    }
    None
}

/// 헤더에서 열 위치 탐색: 완전 일치 우선, 그 다음 부분 일치
///
/// 후보 키 전체에 대해 완전 일치를 먼저 훑고, 없으면 부분 일치로
/// 넘어간다. 두 단계 모두 키 순서가 우선순위다.
pub fn find_col(headers: &[String], keys: &[String]) -> Option<usize> {
    for key in keys {
        if let Some(idx) = headers.iter().position(|h| h.trim() == key.as_str()) {
            return Some(idx);
        }
    }
    for key in keys {
        if let Some(idx) = headers.iter().position(|h| h.contains(key.as_str())) {
            return Some(idx);
        }
    }
    None
}

/// 정규화(공백 제거)된 헤더에서 키워드를 부분 문자열로 포함하는 첫 열
pub fn find_col_containing(norm_headers: &[String], key: &str) -> Option<usize> {
    norm_headers.iter().position(|h| h.contains(key))
}
