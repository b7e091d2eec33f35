use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::models::AppError;

/// 입출고 시트의 열 탐지 키워드
///
/// 헤더 탐지·열 탐지는 전부 이 설정 데이터로 움직이므로, 매칭 로직은
/// 특정 언어의 업무 어휘를 모른다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryColumns {
    /// 헤더 행 점수 계산용 키워드 집합
    pub header_keywords: Vec<String>,
    pub style: Vec<String>,
    pub brand: Vec<String>,
    pub season: Vec<String>,
    pub first_inbound: Vec<String>,
    pub order_qty: Vec<String>,
    pub order_amount: Vec<String>,
    pub inbound_amount: Vec<String>,
    pub outbound_amount: Vec<String>,
    pub sale_amount: Vec<String>,
}

impl Default for InventoryColumns {
    fn default() -> Self {
        let v = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            header_keywords: v(&["브랜드", "스타일", "최초입고일", "입고", "출고", "판매"]),
            style: v(&["스타일코드", "스타일"]),
            brand: v(&["브랜드"]),
            season: v(&["시즌", "season"]),
            first_inbound: v(&["최초입고일", "입고일"]),
            order_qty: v(&["발주 STY", "발주수", "발주량"]),
            order_amount: v(&["발주액"]),
            inbound_amount: v(&["누적입고액", "입고액"]),
            outbound_amount: v(&["출고액"]),
            sale_amount: v(&["누적 판매액[외형매출]", "누적판매액", "판매액"]),
        }
    }
}

/// 등록 시트의 열 탐지 키워드
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterColumns {
    /// 헤더 행 판정의 필수 키워드 1: 스타일코드 열
    pub style_code: String,
    /// 스타일코드 열이 없을 때의 대체 키워드
    pub style_fallback: String,
    /// 헤더 행 판정의 필수 키워드 2: 공홈등록일 열
    pub register_date: String,
    pub season: Vec<String>,
    pub photo_handover: Vec<String>,
    pub retouch_complete: Vec<String>,
}

impl Default for RegisterColumns {
    fn default() -> Self {
        let v = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            style_code: "스타일코드".to_string(),
            style_fallback: "스타일".to_string(),
            register_date: "공홈등록일".to_string(),
            season: v(&["시즌", "Season"]),
            photo_handover: v(&["촬영인계일", "촬영인계"]),
            retouch_complete: v(&["보정완료일", "보정완료"]),
        }
    }
}

/// BU(사업부) 그룹: 라벨과 소속 브랜드 목록
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuGroup {
    pub label: String,
    pub brands: Vec<String>,
}

/// 대시보드 코어 설정
///
/// 논리 소스명 → 스프레드시트 ID 매핑, 브랜드 체계, 키워드 사전, 캐시
/// TTL을 전부 데이터로 들고 있다. 기본값은 운영 중인 한국어 어휘다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// 논리 소스명("inout", 브랜드 키) → 원격 스프레드시트 ID
    pub sheet_ids: HashMap<String, String>,
    /// 입출고 소스의 논리명
    pub inout_key: String,
    pub brands: Vec<String>,
    pub bu_groups: Vec<BuGroup>,
    /// 브랜드명 → 등록 시트 소스 키. 항목이 없는 브랜드는 등록 시트 없음
    pub brand_keys: HashMap<String, String>,
    /// 등록 시트가 없는 브랜드 (등록 관련 수치는 None)
    pub no_register_brands: Vec<String>,
    /// 스타일코드 앞 두 글자(소문자) → 브랜드명
    pub style_prefix_brands: HashMap<String, String>,
    /// 소스 키 → 등록 데이터를 찾을 워크시트명 (지정 시 그 시트만 탐색)
    pub register_sheet_names: HashMap<String, String>,
    pub inventory: InventoryColumns,
    pub register: RegisterColumns,
    /// 입출고 헤더 스캔 행 수
    pub inventory_scan_rows: usize,
    /// 등록 헤더 스캔 행 수
    pub register_scan_rows: usize,
    pub cache_ttl_secs: u64,
    pub register_cache_ttl_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let brands = [
            "스파오",
            "뉴발란스",
            "뉴발란스키즈",
            "후아유",
            "슈펜",
            "미쏘",
            "로엠",
            "클라비스",
            "에블린",
        ];
        let brand_keys = [
            ("스파오", "spao"),
            ("후아유", "whoau"),
            ("클라비스", "clavis"),
            ("미쏘", "mixxo"),
            ("로엠", "roem"),
            ("슈펜", "shoopen"),
            ("에블린", "eblin"),
        ];
        let prefixes = [
            ("sp", "스파오"),
            ("rm", "로엠"),
            ("mi", "미쏘"),
            ("wh", "후아유"),
            ("hp", "슈펜"),
            ("cv", "클라비스"),
            ("eb", "에블린"),
            ("nb", "뉴발란스"),
            ("nk", "뉴발란스키즈"),
        ];
        Self {
            sheet_ids: HashMap::new(),
            inout_key: "inout".to_string(),
            brands: brands.iter().map(|b| b.to_string()).collect(),
            bu_groups: vec![
                BuGroup {
                    label: "캐쥬얼BU".to_string(),
                    brands: vec!["스파오".to_string()],
                },
                BuGroup {
                    label: "스포츠BU".to_string(),
                    brands: ["뉴발란스", "뉴발란스키즈", "후아유", "슈펜"]
                        .iter()
                        .map(|b| b.to_string())
                        .collect(),
                },
                BuGroup {
                    label: "여성BU".to_string(),
                    brands: ["미쏘", "로엠", "클라비스", "에블린"]
                        .iter()
                        .map(|b| b.to_string())
                        .collect(),
                },
            ],
            brand_keys: brand_keys
                .iter()
                .map(|(b, k)| (b.to_string(), k.to_string()))
                .collect(),
            no_register_brands: vec!["뉴발란스".to_string(), "뉴발란스키즈".to_string()],
            style_prefix_brands: prefixes
                .iter()
                .map(|(p, b)| (p.to_string(), b.to_string()))
                .collect(),
            register_sheet_names: HashMap::new(),
            inventory: InventoryColumns::default(),
            register: RegisterColumns::default(),
            inventory_scan_rows: 20,
            register_scan_rows: 30,
            cache_ttl_secs: 300,
            register_cache_ttl_secs: 120,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|err| AppError::new(format!("설정 JSON 해석에 실패했습니다: {err}")))
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| AppError::new(format!("설정 직렬화에 실패했습니다: {err}")))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|err| AppError::new(format!("설정 파일을 읽지 못했습니다: {err}")))?;
        Self::from_json(&content)
    }

    /// 브랜드명 → 등록 시트 소스 키
    pub fn brand_key(&self, brand: &str) -> Option<&str> {
        self.brand_keys.get(brand).map(|k| k.as_str())
    }

    pub fn is_no_register_brand(&self, brand: &str) -> bool {
        self.no_register_brands.iter().any(|b| b == brand)
    }

    /// 스타일코드 접두사(앞 두 글자, 소문자)로 브랜드 유도
    pub fn brand_from_prefix(&self, style: &str) -> Option<&str> {
        let lowered = style.trim().to_lowercase();
        let prefix: String = lowered.chars().take(2).collect();
        self.style_prefix_brands.get(&prefix).map(|b| b.as_str())
    }
}
