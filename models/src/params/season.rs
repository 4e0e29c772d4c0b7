use serde::Deserialize;
use validator::Validate;

use crate::domains::sea_orm_active_enums::SeasonPhase;

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdvancePhaseParams {
    pub target: SeasonPhase,
}
