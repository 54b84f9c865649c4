// Status palette shared with the mobile client.
pub const SUCCESS: &str = "#66BB6A";
pub const WARNING: &str = "#FFA726";
pub const ERROR: &str = "#EF5350";

/// Badge background: the status color at ~12% opacity (`#RRGGBB` + `20`).
pub fn tint(color: &str) -> String {
    format!("{}20", color)
}
