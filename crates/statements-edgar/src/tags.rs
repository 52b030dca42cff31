//! XBRL tag dictionary.
//!
//! Maps each semantic line item to the US-GAAP elements that may carry it.
//! Different registrants tag the same concept with different elements, so each
//! entry lists its candidates in order of preference; extraction takes the first
//! one present in the document with a non-empty value.

/// A semantic line item and its candidate XBRL elements, most preferred first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagEntry {
    /// Semantic label used as the key in the extracted statement.
    pub label: &'static str,
    /// Qualified element names, in order of preference.
    pub candidates: &'static [&'static str],
}

impl TagEntry {
    const fn new(label: &'static str, candidates: &'static [&'static str]) -> Self {
        Self { label, candidates }
    }
}

/// Income statement sections, in presentation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncomeSection {
    /// Revenue and other income.
    Revenue,
    /// Costs and expenses.
    Expenses,
    /// Profit measures.
    Profit,
    /// Per-share data and share counts.
    Shares,
}

impl IncomeSection {
    /// All sections, in presentation order.
    pub const ALL: [Self; 4] = [Self::Revenue, Self::Expenses, Self::Profit, Self::Shares];

    /// Returns the tag entries of this section.
    #[must_use]
    pub const fn entries(&self) -> &'static [TagEntry] {
        match self {
            Self::Revenue => INCOME_REVENUE,
            Self::Expenses => INCOME_EXPENSES,
            Self::Profit => INCOME_PROFIT,
            Self::Shares => INCOME_SHARES,
        }
    }

    /// Returns the section's name as it appears in serialized output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expenses => "expenses",
            Self::Profit => "profit",
            Self::Shares => "shares",
        }
    }
}

/// Line-item labels.
pub mod labels {
    // Cash flow - operating
    /// Net income (loss).
    pub const NET_PROFIT: &str = "Net profit (or loss if negative)";
    /// Depreciation, depletion and amortization.
    pub const DEPRECIATION: &str = "Depreciation (wear & tear on assets)";
    /// Share-based compensation.
    pub const STOCK_COMPENSATION: &str = "stock_comp";
    /// Change in accounts receivable.
    pub const CHANGE_RECEIVABLES: &str = "change_ar";
    /// Change in inventory.
    pub const CHANGE_INVENTORY: &str = "change_inventory";
    /// Change in accounts payable.
    pub const CHANGE_PAYABLES: &str = "change_ap";
    /// Net cash from operating activities.
    pub const OPERATING_CASH_FLOW: &str = "Cash from day-to-day business (Operating Cashflow)";

    // Cash flow - investing
    /// Purchases of property, plant and equipment.
    pub const CAPITAL_EXPENDITURE: &str = "Buying equipment/buildings (Capital Expenditure)";
    /// Business acquisitions, net of cash acquired.
    pub const ACQUISITIONS: &str = "acquisitions";
    /// Proceeds from sale of property, plant and equipment.
    pub const ASSET_SALES: &str = "asset_sales";
    /// Purchases of marketable securities.
    pub const INVESTMENT_PURCHASES: &str = "investments_purchase";
    /// Maturities of marketable securities.
    pub const INVESTMENT_MATURITIES: &str = "investments_maturity";
    /// Net cash from investing activities.
    pub const INVESTING_CASH_FLOW: &str = "Cash from investments (Buying/Selling assets)";

    // Cash flow - financing
    /// Proceeds from issuing common stock.
    pub const SHARE_ISSUANCE: &str = "Money raised from issuing new shares";
    /// Repurchases of common stock.
    pub const SHARE_BUYBACKS: &str = "Money spent buying back shares of company";
    /// Proceeds from issuing long-term debt.
    pub const DEBT_ISSUANCE: &str = "Borrowed money (New loans or bonds)";
    /// Repayments of long-term debt.
    pub const DEBT_REPAYMENT: &str = "Loan repayments";
    /// Dividends paid.
    pub const DIVIDENDS_PAID: &str = "Dividends paid to shareholders";
    /// Net cash from financing activities.
    pub const FINANCING_CASH_FLOW: &str = "Cash from investors and loans (Financing activities)";

    // Cash flow - summary
    /// Net change in cash over the period.
    pub const NET_CHANGE_IN_CASH: &str = "Change in cash during the period";
    /// Cash at the start of the period.
    pub const CASH_BEGINNING: &str = "Cash at the beginning of the period";
    /// Cash at the end of the period.
    pub const CASH_END: &str = "Cash remaining at the end of the period";

    // Income - revenue
    /// Total revenue.
    pub const TOTAL_REVENUE: &str = "Total Revenue";
    /// Advertising revenue.
    pub const ADVERTISING_REVENUE: &str = "Advertising Revenue";
    /// Interest income.
    pub const INTEREST_INCOME: &str = "Interest Income";
    /// Other non-operating income (expense).
    pub const OTHER_INCOME: &str = "Other Income";

    // Income - expenses
    /// Cost of revenue.
    pub const COST_OF_REVENUE: &str = "Cost of Revenue";
    /// Research and development.
    pub const RESEARCH_AND_DEVELOPMENT: &str = "Research & Development";
    /// Sales and marketing.
    pub const SALES_AND_MARKETING: &str = "Sales & Marketing";
    /// General and administrative.
    pub const GENERAL_AND_ADMINISTRATIVE: &str = "General & Administrative";
    /// Total operating expenses.
    pub const OPERATING_EXPENSES: &str = "Operating Expenses (Total)";
    /// Interest expense.
    pub const INTEREST_EXPENSE: &str = "Interest Expense";
    /// Income tax expense (benefit).
    pub const INCOME_TAX_EXPENSE: &str = "Income Tax Expense";

    // Income - profit
    /// Gross profit.
    pub const GROSS_PROFIT: &str = "Gross Profit";
    /// Operating income (loss).
    pub const OPERATING_INCOME: &str = "Operating Income";
    /// Income before income taxes.
    pub const INCOME_BEFORE_TAX: &str = "Income Before Tax";
    /// Net income (loss).
    pub const NET_INCOME: &str = "Net Income";

    // Income - shares
    /// Basic earnings per share.
    pub const EPS_BASIC: &str = "Earnings per Share (Basic)";
    /// Diluted earnings per share.
    pub const EPS_DILUTED: &str = "Earnings per Share (Diluted)";
    /// Weighted average basic shares outstanding.
    pub const SHARES_BASIC: &str = "Weighted Average Shares Outstanding (Basic)";
    /// Weighted average diluted shares outstanding.
    pub const SHARES_DILUTED: &str = "Weighted Average Shares Outstanding (Diluted)";
}

use labels::*;

/// Cash-flow statement line items. One element per label, no fallbacks.
pub const CASH_FLOW: &[TagEntry] = &[
    // Operating
    TagEntry::new(NET_PROFIT, &["us-gaap:NetIncomeLoss"]),
    TagEntry::new(DEPRECIATION, &["us-gaap:DepreciationDepletionAndAmortization"]),
    TagEntry::new(STOCK_COMPENSATION, &["us-gaap:ShareBasedCompensation"]),
    TagEntry::new(CHANGE_RECEIVABLES, &["us-gaap:IncreaseDecreaseInAccountsReceivable"]),
    TagEntry::new(CHANGE_INVENTORY, &["us-gaap:IncreaseDecreaseInInventory"]),
    TagEntry::new(CHANGE_PAYABLES, &["us-gaap:IncreaseDecreaseInAccountsPayable"]),
    TagEntry::new(
        OPERATING_CASH_FLOW,
        &["us-gaap:NetCashProvidedByUsedInOperatingActivities"],
    ),
    // Investing
    TagEntry::new(
        CAPITAL_EXPENDITURE,
        &["us-gaap:PaymentsToAcquirePropertyPlantAndEquipment"],
    ),
    TagEntry::new(
        ACQUISITIONS,
        &["us-gaap:PaymentsToAcquireBusinessesNetOfCashAcquired"],
    ),
    TagEntry::new(
        ASSET_SALES,
        &["us-gaap:ProceedsFromSaleOfPropertyPlantAndEquipment"],
    ),
    TagEntry::new(
        INVESTMENT_PURCHASES,
        &["us-gaap:PaymentsToAcquireMarketableSecurities"],
    ),
    TagEntry::new(
        INVESTMENT_MATURITIES,
        &["us-gaap:ProceedsFromMaturitiesOfMarketableSecurities"],
    ),
    TagEntry::new(
        INVESTING_CASH_FLOW,
        &["us-gaap:NetCashProvidedByUsedInInvestingActivities"],
    ),
    // Financing
    TagEntry::new(SHARE_ISSUANCE, &["us-gaap:ProceedsFromIssuanceOfCommonStock"]),
    TagEntry::new(SHARE_BUYBACKS, &["us-gaap:PaymentsForRepurchaseOfCommonStock"]),
    TagEntry::new(DEBT_ISSUANCE, &["us-gaap:ProceedsFromIssuanceOfLongTermDebt"]),
    TagEntry::new(DEBT_REPAYMENT, &["us-gaap:RepaymentsOfLongTermDebt"]),
    TagEntry::new(DIVIDENDS_PAID, &["us-gaap:PaymentsOfDividends"]),
    TagEntry::new(
        FINANCING_CASH_FLOW,
        &["us-gaap:NetCashProvidedByUsedInFinancingActivities"],
    ),
    // Summary
    TagEntry::new(
        NET_CHANGE_IN_CASH,
        &["us-gaap:CashAndCashEquivalentsPeriodIncreaseDecrease"],
    ),
    TagEntry::new(
        CASH_BEGINNING,
        &["us-gaap:CashAndCashEquivalentsAtBeginningOfPeriod"],
    ),
    TagEntry::new(CASH_END, &["us-gaap:CashAndCashEquivalentsAtCarryingValue"]),
];

/// Income statement - revenue section.
pub const INCOME_REVENUE: &[TagEntry] = &[
    TagEntry::new(
        TOTAL_REVENUE,
        &[
            "us-gaap:Revenues",
            "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax",
            "us-gaap:SalesRevenueNet",
            "us-gaap:SalesRevenueGoodsNet",
            "us-gaap:SalesRevenueServicesNet",
        ],
    ),
    TagEntry::new(ADVERTISING_REVENUE, &["us-gaap:AdvertisingRevenue"]),
    TagEntry::new(INTEREST_INCOME, &["us-gaap:InterestIncome"]),
    TagEntry::new(OTHER_INCOME, &["us-gaap:OtherNonoperatingIncomeExpense"]),
];

/// Income statement - expenses section.
pub const INCOME_EXPENSES: &[TagEntry] = &[
    TagEntry::new(
        COST_OF_REVENUE,
        &["us-gaap:CostOfRevenue", "us-gaap:CostOfGoodsSold"],
    ),
    TagEntry::new(
        RESEARCH_AND_DEVELOPMENT,
        &["us-gaap:ResearchAndDevelopmentExpense"],
    ),
    TagEntry::new(SALES_AND_MARKETING, &["us-gaap:SellingAndMarketingExpense"]),
    TagEntry::new(
        GENERAL_AND_ADMINISTRATIVE,
        &["us-gaap:GeneralAndAdministrativeExpense"],
    ),
    TagEntry::new(OPERATING_EXPENSES, &["us-gaap:OperatingExpenses"]),
    TagEntry::new(INTEREST_EXPENSE, &["us-gaap:InterestExpense"]),
    TagEntry::new(INCOME_TAX_EXPENSE, &["us-gaap:IncomeTaxExpenseBenefit"]),
];

/// Income statement - profit section.
pub const INCOME_PROFIT: &[TagEntry] = &[
    TagEntry::new(GROSS_PROFIT, &["us-gaap:GrossProfit"]),
    TagEntry::new(OPERATING_INCOME, &["us-gaap:OperatingIncomeLoss"]),
    TagEntry::new(
        INCOME_BEFORE_TAX,
        &["us-gaap:IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest"],
    ),
    TagEntry::new(NET_INCOME, &["us-gaap:NetIncomeLoss"]),
];

/// Income statement - shares section.
pub const INCOME_SHARES: &[TagEntry] = &[
    TagEntry::new(EPS_BASIC, &["us-gaap:EarningsPerShareBasic"]),
    TagEntry::new(EPS_DILUTED, &["us-gaap:EarningsPerShareDiluted"]),
    TagEntry::new(
        SHARES_BASIC,
        &["us-gaap:WeightedAverageNumberOfSharesOutstandingBasic"],
    ),
    TagEntry::new(
        SHARES_DILUTED,
        &["us-gaap:WeightedAverageNumberOfDilutedSharesOutstanding"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cash_flow_has_single_candidates() {
        assert_eq!(CASH_FLOW.len(), 22);
        assert!(CASH_FLOW.iter().all(|e| e.candidates.len() == 1));
    }

    #[test]
    fn test_labels_unique_within_statement() {
        let cash: HashSet<_> = CASH_FLOW.iter().map(|e| e.label).collect();
        assert_eq!(cash.len(), CASH_FLOW.len());

        let income: Vec<_> = IncomeSection::ALL
            .iter()
            .flat_map(|s| s.entries().iter().map(|e| e.label))
            .collect();
        let unique: HashSet<_> = income.iter().collect();
        assert_eq!(unique.len(), income.len());
    }

    #[test]
    fn test_cash_flow_keys() {
        assert_eq!(CASH_FLOW[0].label, "Net profit (or loss if negative)");
        assert_eq!(CASH_FLOW[2].label, "stock_comp");
        assert_eq!(
            CASH_FLOW[CASH_FLOW.len() - 1].label,
            "Cash remaining at the end of the period"
        );
        assert!(CASH_FLOW.iter().all(|e| e.label != labels::NET_INCOME));
    }

    #[test]
    fn test_every_entry_has_candidates() {
        for section in IncomeSection::ALL {
            for entry in section.entries() {
                assert!(!entry.candidates.is_empty(), "{} has no tags", entry.label);
            }
        }
    }

    #[test]
    fn test_revenue_candidates_in_preference_order() {
        let revenue = INCOME_REVENUE
            .iter()
            .find(|e| e.label == labels::TOTAL_REVENUE)
            .unwrap();
        assert_eq!(revenue.candidates[0], "us-gaap:Revenues");
        assert_eq!(
            revenue.candidates[1],
            "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax"
        );
    }
}
