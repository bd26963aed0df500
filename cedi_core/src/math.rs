//! Float helpers missing from `core`

pub(crate) fn floor(value: f32) -> f32 {
    let truncated = value as i64 as f32;
    if truncated > value {
        truncated - 1.0
    } else {
        truncated
    }
}

pub(crate) fn ceil(value: f32) -> f32 {
    let truncated = value as i64 as f32;
    if truncated < value {
        truncated + 1.0
    } else {
        truncated
    }
}

pub(crate) fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}
