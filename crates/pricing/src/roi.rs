//! ROI estimator
//!
//! Illustrative savings calculator shown next to the pricing configurator.
//! It has nothing to do with billing: inputs are clamped rather than
//! rejected, and it never touches a selection or a summary.

use serde::{Deserialize, Serialize};

/// Share of manual admin time the suite is assumed to recover
pub const RECOVERY_FACTOR: f64 = 0.7;

/// Share of previously missed invoices assumed to be recovered
pub const RECOVERY_RATE: f64 = 0.8;

/// Assumed yearly subscription cost (99/month)
pub const DEFAULT_ANNUAL_COST: f64 = 1_188.0;

/// Slider range for one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

pub const HOURS_PER_MONTH: FieldBounds = FieldBounds {
    min: 0.0,
    max: 200.0,
    step: 1.0,
};

pub const HOURLY_RATE: FieldBounds = FieldBounds {
    min: 0.0,
    max: 500.0,
    step: 5.0,
};

pub const MISSED_INVOICES: FieldBounds = FieldBounds {
    min: 0.0,
    max: 100.0,
    step: 1.0,
};

pub const AVG_INVOICE_AMOUNT: FieldBounds = FieldBounds {
    min: 0.0,
    max: 50_000.0,
    step: 50.0,
};

/// Slider values entered by the visitor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub hours_per_month: f64,
    pub hourly_rate: f64,
    pub missed_invoices: f64,
    pub avg_invoice_amount: f64,
}

impl RoiInputs {
    /// Every field brought inside its slider range
    pub fn clamped(&self) -> Self {
        Self {
            hours_per_month: HOURS_PER_MONTH.clamp(self.hours_per_month),
            hourly_rate: HOURLY_RATE.clamp(self.hourly_rate),
            missed_invoices: MISSED_INVOICES.clamp(self.missed_invoices),
            avg_invoice_amount: AVG_INVOICE_AMOUNT.clamp(self.avg_invoice_amount),
        }
    }
}

/// Fixed assumptions behind the estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiAssumptions {
    pub recovery_factor: f64,
    pub recovery_rate: f64,
    pub annual_cost: f64,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            recovery_factor: RECOVERY_FACTOR,
            recovery_rate: RECOVERY_RATE,
            annual_cost: DEFAULT_ANNUAL_COST,
        }
    }
}

impl RoiAssumptions {
    pub fn with_annual_cost(annual_cost: f64) -> Self {
        Self {
            annual_cost,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    /// Inputs after clamping
    pub inputs: RoiInputs,
    pub time_savings_per_year: f64,
    pub invoice_savings_per_year: f64,
    pub total_savings: f64,
    pub net_savings: f64,
    pub roi_percent: f64,
    /// Months of savings needed to cover a year of subscription
    pub payback_months: Option<f64>,
}

/// Estimate yearly savings with the default assumptions
pub fn compute_roi(inputs: RoiInputs) -> RoiResult {
    compute_roi_with(inputs, &RoiAssumptions::default())
}

pub fn compute_roi_with(inputs: RoiInputs, assumptions: &RoiAssumptions) -> RoiResult {
    let inputs = inputs.clamped();

    let time_savings_per_year =
        inputs.hours_per_month * assumptions.recovery_factor * inputs.hourly_rate * 12.0;
    let invoice_savings_per_year =
        inputs.missed_invoices * inputs.avg_invoice_amount * 12.0 * assumptions.recovery_rate;
    let total_savings = time_savings_per_year + invoice_savings_per_year;
    let net_savings = total_savings - assumptions.annual_cost;

    let roi_percent = if assumptions.annual_cost > 0.0 {
        net_savings / assumptions.annual_cost * 100.0
    } else {
        0.0
    };

    let payback_months = if total_savings > 0.0 {
        Some(assumptions.annual_cost.max(0.0) / (total_savings / 12.0))
    } else {
        None
    };

    RoiResult {
        inputs,
        time_savings_per_year,
        invoice_savings_per_year,
        total_savings,
        net_savings,
        roi_percent,
        payback_months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute_roi(RoiInputs {
            hours_per_month: 10.0,
            hourly_rate: 50.0,
            missed_invoices: 2.0,
            avg_invoice_amount: 500.0,
        });

        assert!(approx(result.time_savings_per_year, 4_200.0));
        assert!(approx(result.invoice_savings_per_year, 9_600.0));
        assert!(approx(result.total_savings, 13_800.0));
        assert!(approx(result.net_savings, 13_800.0 - 1_188.0));
        assert!(approx(result.roi_percent, (13_800.0 - 1_188.0) / 1_188.0 * 100.0));
    }

    #[test]
    fn test_inputs_are_clamped() {
        let result = compute_roi(RoiInputs {
            hours_per_month: 1_000.0,
            hourly_rate: -20.0,
            missed_invoices: 3.0,
            avg_invoice_amount: f64::NAN,
        });

        assert_eq!(result.inputs.hours_per_month, 200.0);
        assert_eq!(result.inputs.hourly_rate, 0.0);
        assert_eq!(result.inputs.missed_invoices, 3.0);
        assert_eq!(result.inputs.avg_invoice_amount, 0.0);
        assert_eq!(result.total_savings, 0.0);
    }

    #[test]
    fn test_zero_savings_has_no_payback() {
        let result = compute_roi(RoiInputs::default());
        assert_eq!(result.total_savings, 0.0);
        assert!(approx(result.net_savings, -1_188.0));
        assert!(approx(result.roi_percent, -100.0));
        assert!(result.payback_months.is_none());
    }

    #[test]
    fn test_payback_months() {
        // 1188 / (2376 / 12) = 6 months
        let result = compute_roi(RoiInputs {
            hours_per_month: 0.0,
            hourly_rate: 0.0,
            missed_invoices: 1.0,
            avg_invoice_amount: 247.5,
        });
        assert!(approx(result.total_savings, 2_376.0));
        assert!(approx(result.payback_months.unwrap(), 6.0));
    }

    #[test]
    fn test_zero_annual_cost_does_not_divide_by_zero() {
        let inputs = RoiInputs {
            hours_per_month: 10.0,
            hourly_rate: 50.0,
            missed_invoices: 0.0,
            avg_invoice_amount: 0.0,
        };
        let result = compute_roi_with(inputs, &RoiAssumptions::with_annual_cost(0.0));
        assert_eq!(result.roi_percent, 0.0);
        assert!(approx(result.net_savings, 4_200.0));
        assert_eq!(result.payback_months, Some(0.0));
    }

    #[test]
    fn test_custom_annual_cost() {
        let inputs = RoiInputs {
            hours_per_month: 10.0,
            hourly_rate: 50.0,
            missed_invoices: 2.0,
            avg_invoice_amount: 500.0,
        };
        let result = compute_roi_with(inputs, &RoiAssumptions::with_annual_cost(1_380.0));
        // 13800 - 1380 = 12420 -> 900%
        assert!(approx(result.roi_percent, 900.0));
    }
}
