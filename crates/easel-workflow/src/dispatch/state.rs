use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Stage of the dispatch cycle.
///
/// A cycle moves `Idle → Reading → Classifying → Extracting → Invoking → Idle`.
/// A failure while reading or extracting parks the dispatcher in `Failed`
/// until the next trigger. A failed or timed-out invocation, a cancelled
/// dispatch and a selection without a match all return it to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DispatchState {
    #[default]
    Idle,
    Reading,
    Classifying,
    Extracting,
    Invoking,
    Failed,
}
