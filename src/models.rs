use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 온라인 상품등록 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// 공홈등록일이 유효한 날짜로 파싱된 스타일
    Registered,
    /// 등록 시트에 없거나 등록일이 비어 있는 스타일
    Unregistered,
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        RegistrationStatus::Unregistered
    }
}

impl RegistrationStatus {
    /// 표시용 한글 라벨 ("등록" / "미등록")
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "등록",
            RegistrationStatus::Unregistered => "미등록",
        }
    }
}

/// 추출 결과. 빈 결과와 성공을 명시적으로 구분한다
///
/// 시트에 헤더가 없거나 소스 바이트가 비어 있는 경우는 오류가 아니라
/// `Empty`이며, 호출측은 패턴 매칭으로 분기한다.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    Empty,
    Found(T),
}

impl<T> Extracted<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Extracted::Empty)
    }

    /// `Found`이면 값을 꺼내고, `Empty`이면 None
    pub fn found(self) -> Option<T> {
        match self {
            Extracted::Empty => None,
            Extracted::Found(v) => Some(v),
        }
    }

    pub fn as_ref(&self) -> Extracted<&T> {
        match self {
            Extracted::Empty => Extracted::Empty,
            Extracted::Found(v) => Extracted::Found(v),
        }
    }
}

/// 입출고 시트의 원시 1행 (스타일 변형 단위, 집계 전)
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub style: String,
    /// 브랜드 열 또는 스타일코드 접두사에서 유도. 매핑 불가 시 None
    pub brand: Option<String>,
    /// 시즌 원본 문자열 (트리밍만 수행)
    pub season: String,
    pub first_inbound: Option<NaiveDateTime>,
    pub inbound: bool,
    pub outbound: bool,
    pub sold: bool,
    pub order_amount: f64,
    pub inbound_amount: f64,
    pub outbound_amount: f64,
    pub sale_amount: f64,
}

/// 입출고 시트 추출 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTable {
    pub rows: Vec<InventoryRow>,
    /// 발주 수량 열이 탐지되었는지. 없으면 발주 STY수는 0으로 나간다
    pub has_order_qty: bool,
    /// 열 자동 판정 실패 등, 치명적이지 않은 경고
    pub warnings: Vec<String>,
}

/// 등록 시트의 1행
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterRecord {
    pub style: String,
    /// 시즌 원본 문자열 (트리밍만 수행)
    pub season: String,
    pub register_date: Option<NaiveDateTime>,
    /// 촬영인계일 (열이 있는 시트에서만)
    pub photo_handover_date: Option<NaiveDateTime>,
    /// 보정완료일 (열이 있는 시트에서만)
    pub retouch_complete_date: Option<NaiveDateTime>,
    pub status: RegistrationStatus,
}

/// 브랜드 등록 시트 추출 결과
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterTable {
    /// 헤더가 발견된 워크시트명
    pub sheet_name: String,
    pub rows: Vec<RegisterRecord>,
}

/// (브랜드, 스타일) 단위로 집계된 최종 스타일 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub brand: String,
    pub style_code: String,
    pub season: String,
    pub inbound: bool,
    pub outbound: bool,
    pub registration: RegistrationStatus,
}

/// 브랜드 단위 입출고 집계
///
/// STY수는 항상 조건을 만족하는 스타일코드의 고유 개수이며,
/// 금액은 해당 조건을 만족하는 행의 합계다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRollup {
    pub brand: String,
    pub ordered_styles: usize,
    pub ordered_amount: f64,
    pub inbound_styles: usize,
    pub inbound_amount: f64,
    pub outbound_styles: usize,
    pub outbound_amount: f64,
    pub sold_styles: usize,
    pub sold_amount: f64,
}

/// (브랜드, 시즌) 단위 입출고 집계 (브랜드 행 펼침용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSeasonRollup {
    pub brand: String,
    pub season: String,
    pub ordered_styles: usize,
    pub ordered_amount: f64,
    pub inbound_styles: usize,
    pub inbound_amount: f64,
    pub outbound_styles: usize,
    pub outbound_amount: f64,
    pub sold_styles: usize,
    pub sold_amount: f64,
}

/// 브랜드별 상품등록 모니터링 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMonitorRow {
    pub brand: String,
    pub inbound_styles: usize,
    pub registered_styles: usize,
    /// 전체 미등록스타일 (입고 - 등록)
    pub unregistered_styles: usize,
    /// 온라인등록율. 등록 시트가 없는 브랜드는 None
    pub registration_rate: Option<f64>,
    /// 평균 등록 소요일수 (공홈등록일 - 최초입고일). 산출 불가 시 None
    pub avg_register_days: Option<f64>,
}

/// 대시보드 한 번의 갱신 주기에 해당하는 전체 산출물
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub styles: Vec<StyleRecord>,
    pub brand_rollups: Vec<BrandRollup>,
    pub brand_season_rollups: Vec<BrandSeasonRollup>,
    pub monitor: Vec<RegisterMonitorRow>,
    /// 추출 중 발생한 비치명 경고 (열 자동 판정 실패 등)
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}
