use crate::DomainError;

pub const DEFAULT_DISPLAY_MARGIN: u32 = 100;

pub fn display_budget(screen_height: f32, margin: u32) -> u32 {
    if !screen_height.is_finite() || screen_height <= 0.0 {
        return 1;
    }
    let budget = screen_height.round() as i64 - i64::from(margin);
    budget.clamp(1, i64::from(u32::MAX)) as u32
}

pub fn fit_to_height(width: u32, height: u32, budget: u32) -> Result<(u32, u32), DomainError> {
    if width == 0 || height == 0 {
        return Err(DomainError::EmptyImage { width, height });
    }
    if budget == 0 {
        return Err(DomainError::InvalidDisplayBudget(budget));
    }

    let scaled = (f64::from(budget) * f64::from(width) / f64::from(height)).round();
    let scaled_width = scaled.clamp(1.0, f64::from(u32::MAX)) as u32;
    Ok((scaled_width, budget))
}
