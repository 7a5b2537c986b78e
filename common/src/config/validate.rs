use std::fmt::Display;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Fails with a message naming `field` when `value` is outside `min..=max`.
pub fn check_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), String>
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}, got {}", field, min, max, value));
    }
    Ok(())
}
