use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::RegisterTable;
use crate::utils::season::{normalize_selected, normalize_season, strict_season_match};
use crate::utils::text::normalize_style_key;

/// 리드타임 시즌 필터: 정규화 매칭과 엄격 매칭을 동시에(AND) 요구
///
/// 정규화 매칭은 표기 흔들림("G2", "2 시즌")을 흡수하고, 엄격 매칭이
/// 오탐("2024", "22")을 걸러낸다.
pub fn season_filter_passes(raw_season: &str, norm_selected: &[String]) -> bool {
    if norm_selected.is_empty() {
        return true;
    }
    let norm = normalize_season(raw_season);
    let norm_ok = norm_selected.iter().any(|token| *token == norm);
    let strict_ok = norm_selected
        .iter()
        .any(|token| strict_season_match(raw_season, token));
    norm_ok && strict_ok
}

/// 평균 등록 소요일수: 공홈등록일 - 최초입고일 (일 단위)
///
/// 등록일이 입고일보다 앞서는 행은 음수가 아니라 0일로 센다. 입고 전에
/// 등록될 수 없으므로 음수는 입력 오류로 본다. 두 날짜를 모두 아는
/// 스타일이 하나도 없으면 None (0이 아님).
pub fn register_avg_days(
    table: &RegisterTable,
    first_inbound: &HashMap<String, NaiveDateTime>,
    selected_seasons: Option<&[String]>,
) -> Option<f64> {
    if first_inbound.is_empty() {
        return None;
    }
    let norm_selected = selected_seasons.map(normalize_selected).unwrap_or_default();

    let mut diffs: Vec<i64> = Vec::new();
    for record in &table.rows {
        if !season_filter_passes(&record.season, &norm_selected) {
            continue;
        }
        let register_date = match record.register_date {
            Some(d) => d,
            None => continue,
        };
        let base = match first_inbound.get(&normalize_style_key(&record.style)) {
            Some(d) => d,
            None => continue,
        };
        diffs.push((register_date - *base).num_days().max(0));
    }

    if diffs.is_empty() {
        return None;
    }
    Some(diffs.iter().sum::<i64>() as f64 / diffs.len() as f64)
}

/// 단계별 평균 소요일수 (최초입고일 기준)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageLeadTimes {
    /// 최초입고 → 촬영인계
    pub photo_handover_days: Option<f64>,
    /// 최초입고 → 보정완료
    pub retouch_days: Option<f64>,
    /// 최초입고 → 공홈등록
    pub register_days: Option<f64>,
}

/// 중간 마일스톤까지의 평균 소요일수. 해당 열이 없는 시트에서는 None
pub fn stage_lead_times(
    table: &RegisterTable,
    first_inbound: &HashMap<String, NaiveDateTime>,
) -> StageLeadTimes {
    let avg_to = |milestone: fn(&crate::models::RegisterRecord) -> Option<NaiveDateTime>| {
        let mut diffs: Vec<i64> = Vec::new();
        for record in &table.rows {
            let date = match milestone(record) {
                Some(d) => d,
                None => continue,
            };
            if let Some(base) = first_inbound.get(&normalize_style_key(&record.style)) {
                diffs.push((date - *base).num_days().max(0));
            }
        }
        if diffs.is_empty() {
            None
        } else {
            Some(diffs.iter().sum::<i64>() as f64 / diffs.len() as f64)
        }
    };

    StageLeadTimes {
        photo_handover_days: avg_to(|r| r.photo_handover_date),
        retouch_days: avg_to(|r| r.retouch_complete_date),
        register_days: avg_to(|r| r.register_date),
    }
}
