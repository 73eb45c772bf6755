//! Icon resolution from health score and status color.

/// Colors the server reports for jobs that never ran or are switched off.
const INACTIVE_ALIASES: [&str; 2] = ["notbuilt", "disabled"];
/// Canonical color the inactive aliases collapse to.
const GREY: &str = "grey";
/// Directory holding the bundled icon files, relative to the resource root.
const IMAGES_DIR: &str = "images";

/// Map a status color onto the bundled palette. Inactive aliases and a
/// missing or empty color all collapse to grey; anything else passes
/// through verbatim.
pub fn normalize_color(color: Option<&str>) -> &str {
    match color {
        None | Some("") => GREY,
        Some(c) if INACTIVE_ALIASES.contains(&c) => GREY,
        Some(c) => c,
    }
}

/// Resolve the icon path for a job, relative to the resource root.
///
/// An explicit icon reference always wins. Otherwise the health score
/// buckets into a filename together with the normalized color, but only
/// when the raw color is itself present and non-empty; in every other
/// case the normalized color alone names the icon, even when the score
/// fell in a bucket.
pub fn icon_for(score: Option<i64>, icon_url: Option<&str>, color: Option<&str>) -> String {
    let normalized = normalize_color(color);

    if let Some(explicit) = icon_url.filter(|u| !u.is_empty()) {
        return format!("{IMAGES_DIR}/{explicit}");
    }

    if color.is_some_and(|c| !c.is_empty()) {
        if let Some(bucket) = bucket_label(score) {
            return format!("{IMAGES_DIR}/health-{bucket}-{normalized}.png");
        }
    }

    format!("{IMAGES_DIR}/{normalized}.png")
}

/// Bucket label for a health score. Scores are unclamped above 100;
/// negative scores have no bucket at all.
fn bucket_label(score: Option<i64>) -> Option<&'static str> {
    match score? {
        0..=20 => Some("00to19"),
        21..=40 => Some("20to39"),
        41..=60 => Some("40to59"),
        61..=80 => Some("60to79"),
        s if s > 80 => Some("80plus"),
        _ => None,
    }
}
