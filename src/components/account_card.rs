//! Account Card Component
//!
//! Displays a single account with its current balance. The display model is
//! a pure function of the account so formatting is unit-testable without a
//! DOM.

use leptos::*;

use crate::state::global::Account;

/// Display model for one account card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountCardModel {
    pub title: String,
    /// Uppercased account kind, e.g. `CASH`
    pub kind_label: String,
    /// Locale-grouped balance, e.g. `₹1,000`
    pub balance_display: String,
    pub icon: String,
    pub accent: String,
}

/// Build the display model for an account
pub fn account_card_model(account: &Account) -> AccountCardModel {
    AccountCardModel {
        title: account.name.clone(),
        kind_label: account.kind.to_uppercase(),
        balance_display: format_inr(account.balance),
        icon: account
            .icon
            .clone()
            .unwrap_or_else(|| "fa-piggy-bank".to_string()),
        accent: account.color.clone().unwrap_or_else(|| "primary".to_string()),
    }
}

/// Format rupees with Indian digit grouping. Paise are shown only for
/// non-whole amounts.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let abs = amount.abs();
    let mut whole = abs.trunc() as u64;
    let mut paise = (abs.fract() * 100.0).round() as u64;
    if paise >= 100 {
        whole += 1;
        paise = 0;
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&group_indian(whole));
    if paise > 0 {
        out.push_str(&format!(".{:02}", paise));
    }
    out
}

/// Indian grouping: last three digits, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    let mut i = head.len();
    while i > 2 {
        pairs.push(&head[i - 2..i]);
        i -= 2;
    }
    pairs.push(&head[..i]);

    let mut out = String::new();
    for pair in pairs.iter().rev() {
        out.push_str(pair);
        out.push(',');
    }
    out.push_str(tail);
    out
}

/// Account card component
#[component]
pub fn AccountCard(account: Account) -> impl IntoView {
    let model = account_card_model(&account);

    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition">
            // Header with kind label and icon hint
            <div class="flex items-center justify-between">
                <span class="text-gray-500 text-xs tracking-wide">{model.kind_label}</span>
                <i class=format!("{} text-gray-500", model.icon) />
            </div>

            // Account name
            <div class="text-gray-300 mt-1 truncate">{model.title}</div>

            // Balance
            <div class="text-3xl font-bold mt-2">{model.balance_display}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash_account(balance: f64) -> Account {
        Account {
            id: None,
            name: "Cash".to_string(),
            kind: "cash".to_string(),
            balance,
            icon: None,
            color: None,
        }
    }

    #[test]
    fn test_cash_account_renders_grouped_rupees_and_uppercased_kind() {
        let model = account_card_model(&cash_account(1000.0));
        assert_eq!(model.balance_display, "₹1,000");
        assert_eq!(model.kind_label, "CASH");
        assert_eq!(model.title, "Cash");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(25000.0), "₹25,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(1_850_000.0), "₹18,50,000");
        assert_eq!(format_inr(12_34_56_789.0), "₹12,34,56,789");
    }

    #[test]
    fn test_paise_shown_only_for_non_whole_amounts() {
        assert_eq!(format_inr(1234.5), "₹1,234.50");
        assert_eq!(format_inr(1234.05), "₹1,234.05");
        assert_eq!(format_inr(1234.999), "₹1,235");
    }

    #[test]
    fn test_negative_balance() {
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }

    #[test]
    fn test_missing_icon_and_color_fall_back() {
        let model = account_card_model(&cash_account(1.0));
        assert_eq!(model.icon, "fa-piggy-bank");
        assert_eq!(model.accent, "primary");
    }
}
