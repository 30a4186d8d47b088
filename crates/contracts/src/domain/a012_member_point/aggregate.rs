use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::resource::Resource;
use crate::shared::validation::{Validate, ValidationErrors};

/// Loyalty points ledger entry of a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPoint {
    pub id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    /// Positive for earned points, negative for redeemed or revoked
    pub points: i64,
    /// Member balance after this entry
    #[serde(default)]
    pub balance: Option<i64>,
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for MemberPoint {
    type Item = MemberPoint;
    type Form = MemberPointForm;

    fn resource_index() -> &'static str {
        "a012"
    }

    fn path() -> &'static str {
        "member-points"
    }

    fn element_name() -> &'static str {
        "Point adjustment"
    }

    fn list_name() -> &'static str {
        "Member points"
    }

    fn item_id(item: &MemberPoint) -> i64 {
        item.id
    }

    fn item_label(item: &MemberPoint) -> String {
        let member = item
            .member_name
            .clone()
            .unwrap_or_else(|| format!("member #{}", item.member_id));
        format!("{:+} points for {}", item.points, member)
    }

    fn to_form(item: &MemberPoint) -> MemberPointForm {
        MemberPointForm {
            member_id: Some(item.member_id),
            points: item.points,
            reason: item.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberPointForm {
    pub member_id: Option<i64>,
    pub points: i64,
    pub reason: String,
}

impl Validate for MemberPointForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("member_id", "Member", self.member_id);
        errors.require_text("reason", "Reason", &self.reason);
        if self.points == 0 {
            errors.add("points", "Points must not be zero");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_shows_sign() {
        let entry = MemberPoint {
            id: 1,
            member_id: 12,
            member_name: None,
            points: -250,
            balance: Some(750),
            reason: "Voucher redeemed".into(),
            created_at: None,
        };
        assert_eq!(MemberPoint::item_label(&entry), "-250 points for member #12");
    }

    #[test]
    fn test_zero_adjustment_is_rejected() {
        let form = MemberPointForm {
            member_id: Some(12),
            points: 0,
            reason: "typo".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().first("points"),
            Some("Points must not be zero")
        );
    }
}
