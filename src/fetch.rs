use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::DashboardConfig;
use crate::models::AppError;

/// 캐시 만료 판정용 시계. 테스트에서 가짜 시계를 주입할 수 있다
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 원격 스프레드시트 소스. 인증·네트워크는 호출측 구현의 몫이며,
/// 코어는 내보내기 바이트만 받는다
pub trait SheetSource {
    fn fetch_sheet(&mut self, sheet_id: &str) -> Result<Vec<u8>, AppError>;
}

/// 소스 ID → (값, 만료 시각)의 명시적 TTL 캐시
///
/// 값에는 "가져오기 실패"(None)도 포함된다. 실패도 TTL 동안 캐시해
/// 갱신 주기마다 실패한 원격 호출을 반복하지 않는다.
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: HashMap<String, (Option<Vec<u8>>, Instant)>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 항목을 돌려준다. 만료는 조회 시점에 판정
    pub fn get(&self, key: &str, now: Instant) -> Option<Option<Vec<u8>>> {
        match self.entries.get(key) {
            Some((value, expires_at)) if now < *expires_at => Some(value.clone()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: String, value: Option<Vec<u8>>, expires_at: Instant) {
        self.entries.insert(key, (value, expires_at));
    }

    pub fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, (_, expires_at)| now < *expires_at);
    }
}

/// TTL 캐시를 앞단에 둔 시트 가져오기
///
/// 입출고 소스와 브랜드 등록 소스의 TTL이 다르다 (등록 시트가 더 자주
/// 갱신된다). 동시성 장치가 아니라 중복 원격 호출을 줄이는 편의 장치다.
pub struct CachedFetcher<S, C = SystemClock> {
    source: S,
    clock: C,
    cache: TtlCache,
    inout_ttl: Duration,
    register_ttl: Duration,
}

impl<S: SheetSource, C: Clock> CachedFetcher<S, C> {
    pub fn new(source: S, clock: C, inout_ttl: Duration, register_ttl: Duration) -> Self {
        Self {
            source,
            clock,
            cache: TtlCache::new(),
            inout_ttl,
            register_ttl,
        }
    }

    pub fn from_config(source: S, clock: C, config: &DashboardConfig) -> Self {
        Self::new(
            source,
            clock,
            Duration::from_secs(config.cache_ttl_secs),
            Duration::from_secs(config.register_cache_ttl_secs),
        )
    }

    /// 시트 바이트를 가져온다. 실패·빈 응답은 None ("데이터 없음")
    pub fn fetch(&mut self, sheet_id: &str, ttl: Duration) -> Option<Vec<u8>> {
        if sheet_id.trim().is_empty() {
            return None;
        }
        let now = self.clock.now();
        if let Some(cached) = self.cache.get(sheet_id, now) {
            return cached;
        }
        let fetched = match self.source.fetch_sheet(sheet_id) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            _ => None,
        };
        self.cache
            .insert(sheet_id.to_string(), fetched.clone(), now + ttl);
        fetched
    }
}

/// 논리 소스명 → 바이트 (가져오기 실패는 None)
pub type SourceMap = HashMap<String, Option<Vec<u8>>>;

/// 설정에 등록된 모든 소스를 한 번에 가져온다
pub fn collect_sources<S: SheetSource, C: Clock>(
    fetcher: &mut CachedFetcher<S, C>,
    config: &DashboardConfig,
) -> SourceMap {
    config
        .sheet_ids
        .iter()
        .map(|(key, sheet_id)| {
            let ttl = if *key == config.inout_key {
                fetcher.inout_ttl
            } else {
                fetcher.register_ttl
            };
            (key.clone(), fetcher.fetch(sheet_id, ttl))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ManualClock {
        base: Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + self.offset.get()
        }
    }

    struct CountingSource {
        calls: usize,
        fail: bool,
    }

    impl SheetSource for CountingSource {
        fn fetch_sheet(&mut self, _sheet_id: &str) -> Result<Vec<u8>, AppError> {
            self.calls += 1;
            if self.fail {
                Err(AppError::new("원격 호출 실패"))
            } else {
                Ok(vec![1, 2, 3])
            }
        }
    }

    fn fetcher(fail: bool) -> (CachedFetcher<CountingSource, ManualClock>, Rc<Cell<Duration>>) {
        let offset = Rc::new(Cell::new(Duration::ZERO));
        let clock = ManualClock {
            base: Instant::now(),
            offset: Rc::clone(&offset),
        };
        let f = CachedFetcher::new(
            CountingSource { calls: 0, fail },
            clock,
            Duration::from_secs(300),
            Duration::from_secs(120),
        );
        (f, offset)
    }

    #[test]
    fn test_cache_hit_within_ttl() {
        let (mut f, offset) = fetcher(false);
        let ttl = Duration::from_secs(300);
        assert!(f.fetch("sheet-1", ttl).is_some());
        offset.set(Duration::from_secs(299));
        assert!(f.fetch("sheet-1", ttl).is_some());
        assert_eq!(f.source.calls, 1);
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let (mut f, offset) = fetcher(false);
        let ttl = Duration::from_secs(300);
        f.fetch("sheet-1", ttl);
        offset.set(Duration::from_secs(300));
        f.fetch("sheet-1", ttl);
        assert_eq!(f.source.calls, 2);
    }

    #[test]
    fn test_failure_is_cached_as_none() {
        let (mut f, _offset) = fetcher(true);
        let ttl = Duration::from_secs(300);
        assert_eq!(f.fetch("sheet-1", ttl), None);
        assert_eq!(f.fetch("sheet-1", ttl), None);
        assert_eq!(f.source.calls, 1);
    }

    #[test]
    fn test_empty_sheet_id_skips_source() {
        let (mut f, _offset) = fetcher(false);
        assert_eq!(f.fetch("", Duration::from_secs(300)), None);
        assert_eq!(f.source.calls, 0);
    }

    #[test]
    fn test_purge_expired_drops_stale_entries() {
        let base = Instant::now();
        let mut cache = TtlCache::new();
        cache.insert("a".to_string(), Some(vec![1]), base + Duration::from_secs(10));
        cache.insert("b".to_string(), None, base + Duration::from_secs(100));
        cache.purge_expired(base + Duration::from_secs(50));
        assert!(cache.get("a", base + Duration::from_secs(50)).is_none());
        assert!(cache.get("b", base + Duration::from_secs(50)).is_some());
    }

    #[test]
    fn test_collect_sources_maps_logical_keys() {
        let (mut f, _offset) = fetcher(false);
        let mut config = DashboardConfig::default();
        config.sheet_ids.insert("inout".to_string(), "id-1".to_string());
        config.sheet_ids.insert("spao".to_string(), "id-2".to_string());
        config.sheet_ids.insert("roem".to_string(), String::new());
        let sources = collect_sources(&mut f, &config);
        assert!(sources.get("inout").unwrap().is_some());
        assert!(sources.get("spao").unwrap().is_some());
        assert!(sources.get("roem").unwrap().is_none());
    }
}
