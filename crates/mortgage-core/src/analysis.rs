//! Derived loan figures computed from a normalized record.

use serde::{Deserialize, Serialize};

use crate::models::record::MortgageRecord;
use crate::render::format_currency;

/// Rough assessment of an APR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateAssessment {
    /// Below 3%.
    Excellent,
    /// 3% up to 4%.
    Good,
    /// 4% up to 5%.
    Fair,
    /// 5% and above.
    ConsiderRefinancing,
}

impl RateAssessment {
    pub fn from_apr(apr: f64) -> Self {
        if apr < 3.0 {
            RateAssessment::Excellent
        } else if apr < 4.0 {
            RateAssessment::Good
        } else if apr < 5.0 {
            RateAssessment::Fair
        } else {
            RateAssessment::ConsiderRefinancing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateAssessment::Excellent => "Excellent",
            RateAssessment::Good => "Good",
            RateAssessment::Fair => "Fair",
            RateAssessment::ConsiderRefinancing => "Consider refinancing",
        }
    }
}

/// Figures derived from loan amount, balance and APR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanAnalysis {
    /// Loan amount minus outstanding balance.
    pub principal_paid: Option<f64>,
    /// Principal paid as a percentage of the loan amount.
    pub equity_percentage: Option<f64>,
    /// Assessment of the APR.
    pub rate_assessment: Option<RateAssessment>,
}

/// Analyze a record. Parts whose inputs are absent stay absent.
pub fn analyze(record: &MortgageRecord) -> LoanAnalysis {
    let parsed = &record.parsed_fields;

    let (principal_paid, equity_percentage) = match (parsed.loan_amount, parsed.outstanding_balance) {
        (Some(loan), Some(balance)) if loan > 0.0 => {
            let paid = loan - balance;
            (Some(paid), Some(paid / loan * 100.0))
        }
        _ => (None, None),
    };

    LoanAnalysis {
        principal_paid,
        equity_percentage,
        rate_assessment: parsed.apr.map(RateAssessment::from_apr),
    }
}

impl LoanAnalysis {
    pub fn is_empty(&self) -> bool {
        self.principal_paid.is_none() && self.rate_assessment.is_none()
    }

    /// Render as a text block to append to the summary.
    pub fn render(&self, apr: Option<f64>) -> String {
        let mut output = String::from("\n=== Loan Analysis ===\n");

        if let Some(paid) = self.principal_paid {
            output.push_str(&format!("Principal Paid: {}\n", format_currency(paid)));
        }
        if let Some(equity) = self.equity_percentage {
            output.push_str(&format!("Equity Built: {:.2}%\n", equity));
        }
        if let (Some(assessment), Some(apr)) = (self.rate_assessment, apr) {
            output.push_str(&format!("Rate Assessment: {} (APR: {}%)\n", assessment.label(), apr));
        }

        output
    }
}
