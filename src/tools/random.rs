use rand::Rng;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::content::ToolResult;

pub const NAME: &str = "getrandomnumber";
pub const DESCRIPTION: &str = "Get a random integer between x and y (inclusive)";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RandomArgs {
    /// Lower bound.
    pub x: f64,
    /// Upper bound.
    pub y: f64,
}

pub async fn get_random_number(args: RandomArgs) -> ToolResult {
    let sample: f64 = rand::rng().random();
    ToolResult::text(pick(args.x, args.y, sample).to_string())
}

/// `floor(sample * (y - x + 1)) + x` for `sample` in `[0, 1)`. The bounds are
/// not reordered: with `x > y` the formula is applied as is.
pub fn pick(x: f64, y: f64, sample: f64) -> f64 {
    (sample * (y - x + 1.0)).floor() + x
}
