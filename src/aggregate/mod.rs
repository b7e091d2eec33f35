mod leadtime;
mod rollup;

pub use leadtime::{register_avg_days, season_filter_passes, stage_lead_times, StageLeadTimes};
pub use rollup::{
    brand_rollups, brand_season_rollups, build_register_monitor, build_style_table,
    filter_styles_by_season,
};
