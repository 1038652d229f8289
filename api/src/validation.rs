//! Validation of admin form input. A request only exists once its input
//! has been checked, so no contract call can start from invalid input.

use thiserror::Error;

use crate::stx_amount::AmountError;
use crate::stx_amount::MicroStx;

/// Minimum length of a recipient address accepted by the forms.
pub const MIN_RECIPIENT_LEN: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipientError {
    #[error("Recipient is required")]
    TooShort,
}

/// Per-field errors of an admin form.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("invalid form input")]
pub struct FormErrors {
    pub recipient: Option<RecipientError>,
    pub amount: Option<AmountError>,
}

impl FormErrors {
    /// The first error message, in field order, for a one-line summary.
    pub fn first_message(&self) -> Option<String> {
        self.recipient
            .as_ref()
            .map(|e| e.to_string())
            .or_else(|| self.amount.as_ref().map(|e| e.to_string()))
    }
}

pub fn validate_recipient(s: &str) -> Result<String, RecipientError> {
    let s = s.trim();
    if s.chars().count() < MIN_RECIPIENT_LEN {
        return Err(RecipientError::TooShort);
    }
    Ok(s.to_string())
}

/// A validated admin action, ready to send to the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRequest {
    Deposit { amount: MicroStx },
    Mint { recipient: String, amount: MicroStx },
    Burn { recipient: String, amount: MicroStx },
    Pause,
    Unpause,
}

impl AdminRequest {
    pub fn deposit(amount: &str) -> Result<Self, FormErrors> {
        MicroStx::from_str_input(amount)
            .map(|amount| Self::Deposit { amount })
            .map_err(|e| FormErrors {
                recipient: None,
                amount: Some(e),
            })
    }

    pub fn mint(recipient: &str, amount: &str) -> Result<Self, FormErrors> {
        let (recipient, amount) = Self::recipient_and_amount(recipient, amount)?;
        Ok(Self::Mint { recipient, amount })
    }

    pub fn burn(recipient: &str, amount: &str) -> Result<Self, FormErrors> {
        let (recipient, amount) = Self::recipient_and_amount(recipient, amount)?;
        Ok(Self::Burn { recipient, amount })
    }

    /// Mint and burn move whole tokens, so fractional input is rejected here
    /// rather than truncated by the contract.
    fn recipient_and_amount(
        recipient: &str,
        amount: &str,
    ) -> Result<(String, MicroStx), FormErrors> {
        match (validate_recipient(recipient), MicroStx::from_token_input(amount)) {
            (Ok(r), Ok(a)) => Ok((r, a)),
            (r, a) => Err(FormErrors {
                recipient: r.err(),
                amount: a.err(),
            }),
        }
    }

    pub fn amount(&self) -> Option<MicroStx> {
        match self {
            Self::Deposit { amount } | Self::Mint { amount, .. } | Self::Burn { amount, .. } => {
                Some(*amount)
            }
            Self::Pause | Self::Unpause => None,
        }
    }

    pub fn recipient(&self) -> Option<&str> {
        match self {
            Self::Mint { recipient, .. } | Self::Burn { recipient, .. } => Some(recipient),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_amounts() {
        assert_eq!(
            AdminRequest::deposit("12.5"),
            Ok(AdminRequest::Deposit {
                amount: MicroStx::from_micro(12_500_000)
            })
        );
        let err = AdminRequest::deposit("-5").unwrap_err();
        assert_eq!(err.amount, Some(AmountError::NotPositive));
        assert_eq!(err.first_message().as_deref(), Some("Amount must be greater than 0"));
    }

    #[test]
    fn mint_reports_every_field() {
        let err = AdminRequest::mint("SP1", "x").unwrap_err();
        assert_eq!(err.recipient, Some(RecipientError::TooShort));
        assert_eq!(err.amount, Some(AmountError::NotANumber));
        assert_eq!(err.first_message().as_deref(), Some("Recipient is required"));

        let ok = AdminRequest::burn("  SP2DEF456  ", "3").unwrap();
        assert_eq!(ok.recipient(), Some("SP2DEF456"));
        assert_eq!(ok.amount(), Some(MicroStx::from_stx(3)));
    }

    #[test]
    fn token_forms_reject_fractions() {
        for input in ["0.5", "12.5"] {
            let err = AdminRequest::mint("SP2RECIPIENT", input).unwrap_err();
            assert_eq!(err.amount, Some(AmountError::NotWholeTokens));
            assert_eq!(err.recipient, None);
            let err = AdminRequest::burn("SP2RECIPIENT", input).unwrap_err();
            assert_eq!(err.amount, Some(AmountError::NotWholeTokens));
        }
        assert_eq!(
            AdminRequest::mint("SP2RECIPIENT", "12"),
            Ok(AdminRequest::Mint {
                recipient: "SP2RECIPIENT".to_string(),
                amount: MicroStx::from_stx(12),
            })
        );
        // deposits are STX and keep their fraction
        assert!(AdminRequest::deposit("0.5").is_ok());
    }
}
