//! Domain enumerations stored as text columns.
//!
//! Entities keep these values as plain text columns, and the core layer
//! converts through the enums below so that unknown values are rejected at
//! the edge.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a text-backed enum.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Column representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
                match normalized.as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(Error::UnknownCategory {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// The seven fixed medical expense categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalCategory {
    /// Doctor visits and consultations
    Consultation,
    /// Dental treatment
    DentalCare,
    /// Eye exams, glasses, lenses
    EyeCare,
    /// In-patient hospital stays
    Hospitalization,
    /// Prescribed medicines
    Medicines,
    /// Laboratory and diagnostic tests
    LabTests,
    /// Maternity care
    Maternity,
}

text_enum!(MedicalCategory, "medical category", {
    Consultation => "consultation",
    DentalCare => "dental_care",
    EyeCare => "eye_care",
    Hospitalization => "hospitalization",
    Medicines => "medicines",
    LabTests => "lab_tests",
    Maternity => "maternity",
});

/// Who received the treatment being claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Beneficiary {
    /// The employee
    Employee,
    /// Spouse
    Spouse,
    /// Parents
    Parents,
    /// Siblings
    Siblings,
    /// Children
    Children,
}

text_enum!(Beneficiary, "beneficiary", {
    Employee => "self",
    Spouse => "spouse",
    Parents => "parents",
    Siblings => "siblings",
    Children => "children",
});

/// How a claim is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Employee paid and is reimbursed
    Reimbursement,
    /// Provider billed the company directly
    DirectBilling,
}

text_enum!(PaymentType, "payment type", {
    Reimbursement => "reimbursement",
    DirectBilling => "direct_billing",
});

/// Kind of absence requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual vacation
    Annual,
    /// Sick leave
    Sick,
    /// Casual leave
    Casual,
    /// Unpaid leave
    Unpaid,
}

text_enum!(LeaveType, "leave type", {
    Annual => "annual",
    Sick => "sick",
    Casual => "casual",
    Unpaid => "unpaid",
});

/// Leave request state. `Pending` is decided exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision
    Pending,
    /// Approved by an administrator
    Approved,
    /// Rejected by an administrator
    Rejected,
}

text_enum!(LeaveStatus, "leave status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});
