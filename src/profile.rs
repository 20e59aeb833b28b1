// src/profile.rs
//! Company account profile, its edit session, and the subscription plan catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub company_name: String,
    pub company_email: String,
    pub industry: String,
    pub website: String,
}

impl AccountProfile {
    pub fn builtin() -> Self {
        Self {
            company_name: "Acme Corporation".to_string(),
            company_email: "careers@acmecorp.com".to_string(),
            industry: "Technology".to_string(),
            website: "https://www.acmecorp.com".to_string(),
        }
    }

    /// All problems at once, so a form can mark every bad field.
    pub fn validate(&self) -> DashboardResult<()> {
        let mut errors = Vec::new();

        if self.company_name.trim().is_empty() {
            errors.push(FieldError::new("company_name", "Company name is required"));
        }
        if !looks_like_email(self.company_email.trim()) {
            errors.push(FieldError::new(
                "company_email",
                "Enter a valid email address",
            ));
        }
        let website = self.website.trim();
        let has_scheme = website.starts_with("http://") || website.starts_with("https://");
        if !website.is_empty() && !has_scheme {
            errors.push(FieldError::new(
                "website",
                "Website must start with http:// or https://",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::Validation(errors))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Saved profile plus an optional working copy. Cancel drops the copy, save swaps it in.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    saved: AccountProfile,
    draft: Option<AccountProfile>,
}

impl ProfileEditor {
    pub fn new(saved: AccountProfile) -> Self {
        Self { saved, draft: None }
    }

    pub fn saved(&self) -> &AccountProfile {
        &self.saved
    }

    pub fn draft(&self) -> Option<&AccountProfile> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Starts (or restarts) editing from the saved values.
    pub fn begin(&mut self) -> &mut AccountProfile {
        self.draft.insert(self.saved.clone())
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Validated copy of the draft, ready to hand to the collaborator.
    pub fn prepare_save(&self) -> DashboardResult<AccountProfile> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| DashboardError::invalid("profile", "Profile is not being edited"))?;
        draft.validate()?;
        Ok(draft.clone())
    }

    pub fn commit(&mut self, saved: AccountProfile) {
        self.saved = saved;
        self.draft = None;
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub monthly_price: u32,
    pub yearly_price: u32,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

pub const PLANS: [Plan; 4] = [
    Plan {
        id: "free",
        name: "Free",
        monthly_price: 0,
        yearly_price: 0,
        description: "Perfect for getting started",
        features: &[
            "Up to 5 job postings",
            "Basic AI screening",
            "Email support",
            "Up to 100 applications/month",
            "Basic analytics",
        ],
    },
    Plan {
        id: "standard",
        name: "Standard",
        monthly_price: 49,
        yearly_price: 490,
        description: "Great for growing teams",
        features: &[
            "Unlimited job postings",
            "Advanced AI screening",
            "Priority email support",
            "Unlimited applications",
            "Custom screening questions",
            "Team members (up to 5)",
        ],
    },
    Plan {
        id: "pro",
        name: "Pro",
        monthly_price: 99,
        yearly_price: 990,
        description: "Most popular choice",
        features: &[
            "Everything in Standard",
            "Google Sheets integration",
            "Priority support",
            "Advanced analytics",
            "Team members (up to 15)",
            "Custom branding",
            "API access",
        ],
    },
    Plan {
        id: "premium",
        name: "Premium",
        monthly_price: 199,
        yearly_price: 1990,
        description: "Enterprise-grade solution",
        features: &[
            "Everything in Pro",
            "Dedicated account manager",
            "24/7 phone support",
            "Unlimited team members",
            "Custom integrations",
            "Advanced security features",
            "SLA guarantee",
            "White-label options",
        ],
    },
];

pub fn find_plan(id: &str) -> DashboardResult<&'static Plan> {
    let wanted = id.trim().to_lowercase();
    PLANS
        .iter()
        .find(|p| p.id == wanted)
        .ok_or_else(|| DashboardError::UnknownPlan(id.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Savings {
    pub amount: i64,
    pub percent: i64,
}

/// Yearly billing versus twelve monthly payments.
pub fn calculate_savings(monthly_price: u32, yearly_price: u32) -> Savings {
    let monthly_total = i64::from(monthly_price) * 12;
    let amount = monthly_total - i64::from(yearly_price);
    let percent = if monthly_price > 0 {
        (amount as f64 / monthly_total as f64 * 100.0).round() as i64
    } else {
        0
    };
    Savings { amount, percent }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: Plan,
    pub is_current: bool,
    /// Yearly price spread over twelve months, rounded.
    pub yearly_per_month: u32,
    pub savings: Savings,
}

pub fn plan_views(current_plan: &str) -> Vec<PlanView> {
    PLANS
        .iter()
        .map(|plan| PlanView {
            plan: *plan,
            is_current: plan.id == current_plan,
            yearly_per_month: (f64::from(plan.yearly_price) / 12.0).round() as u32,
            savings: calculate_savings(plan.monthly_price, plan.yearly_price),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan_id: String,
    pub renews_on: NaiveDate,
}

impl Subscription {
    pub fn builtin() -> Self {
        Self {
            plan_id: "pro".to_string(),
            renews_on: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default(),
        }
    }

    pub fn plan(&self) -> DashboardResult<&'static Plan> {
        find_plan(&self.plan_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profile_is_valid() {
        assert!(AccountProfile::builtin().validate().is_ok());
    }

    #[test]
    fn test_validation_reports_every_field() {
        let profile = AccountProfile {
            company_name: "  ".to_string(),
            company_email: "careers-at-acme".to_string(),
            industry: String::new(),
            website: "www.acmecorp.com".to_string(),
        };
        let err = profile.validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["company_name", "company_email", "website"]);
    }

    #[test]
    fn test_email_needs_domain() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@acme.com"));
        assert!(!looks_like_email("a@@acme.com"));
    }

    #[test]
    fn test_empty_website_is_allowed() {
        let mut profile = AccountProfile::builtin();
        profile.website = String::new();
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = ProfileEditor::new(AccountProfile::builtin());
        editor.begin().company_name = "Globex".to_string();
        editor.cancel();

        assert!(!editor.is_editing());
        assert_eq!(editor.saved().company_name, "Acme Corporation");
    }

    #[test]
    fn test_save_requires_session_and_valid_draft() {
        let mut editor = ProfileEditor::new(AccountProfile::builtin());
        assert!(editor.prepare_save().is_err());

        editor.begin().company_email = "nope".to_string();
        assert!(editor.prepare_save().is_err());

        editor.begin().company_name = "Globex".to_string();
        let ready = editor.prepare_save().unwrap();
        editor.commit(ready);
        assert_eq!(editor.saved().company_name, "Globex");
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_savings() {
        assert_eq!(calculate_savings(49, 490), Savings { amount: 98, percent: 17 });
        assert_eq!(calculate_savings(0, 0), Savings { amount: 0, percent: 0 });
    }

    #[test]
    fn test_find_plan() {
        assert_eq!(find_plan("Premium").unwrap().monthly_price, 199);
        assert!(matches!(
            find_plan("enterprise"),
            Err(DashboardError::UnknownPlan(_))
        ));
    }

    #[test]
    fn test_plan_views_mark_current() {
        let views = plan_views("pro");
        let current: Vec<_> = views.iter().filter(|v| v.is_current).map(|v| v.plan.id).collect();
        assert_eq!(current, vec!["pro"]);
        assert_eq!(views[2].yearly_per_month, 83);
    }
}
