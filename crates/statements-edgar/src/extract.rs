//! Statement extraction from a primary XBRL document.
//!
//! Each line item is resolved through its [`TagEntry`] candidates. The income
//! statement then fills gaps from related items (gross profit from revenue and
//! cost of revenue, and so on); a derived value never replaces a reported one.

use statements_core::{
    CashFlowStatement, DocumentReference, IncomeStatement, LineValue, Result, StatementSection,
};
use tracing::{debug, instrument};

use crate::client::EdgarClient;
use crate::markup::FactIndex;
use crate::tags::{CASH_FLOW, IncomeSection, TagEntry};

/// Both statements read from one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedStatements {
    /// Cash-flow line items.
    pub cashflow: CashFlowStatement,
    /// Income-statement line items, derivations applied.
    pub income_statement: IncomeStatement,
}

/// Resolves one line item: the first candidate present with non-empty text wins.
#[must_use]
pub fn resolve_entry(facts: &FactIndex, entry: &TagEntry) -> LineValue {
    entry
        .candidates
        .iter()
        .filter_map(|element| facts.get(element))
        .find(|text| !text.trim().is_empty())
        .map_or(LineValue::Absent, LineValue::parse)
}

fn resolve_section(facts: &FactIndex, entries: &[TagEntry]) -> StatementSection {
    entries
        .iter()
        .map(|entry| (entry.label, resolve_entry(facts, entry)))
        .collect()
}

/// Reads the cash-flow statement. No values are derived.
#[must_use]
pub fn cashflow_from_facts(facts: &FactIndex) -> CashFlowStatement {
    resolve_section(facts, CASH_FLOW)
}

/// Reads the income statement and applies [`apply_derivations`].
#[must_use]
pub fn income_from_facts(facts: &FactIndex) -> IncomeStatement {
    let mut income = IncomeStatement::default();
    for section in IncomeSection::ALL {
        let values = resolve_section(facts, section.entries());
        debug!(
            section = section.name(),
            present = values.present_count(),
            "Resolved income section"
        );
        match section {
            IncomeSection::Revenue => income.revenue = values,
            IncomeSection::Expenses => income.expenses = values,
            IncomeSection::Profit => income.profit = values,
            IncomeSection::Shares => income.shares = values,
        }
    }
    apply_derivations(&mut income);
    income
}

/// Fills absent income-statement totals from their components.
///
/// Rules run in order and each fires only while its target is absent:
///
/// 1. Gross Profit = Total Revenue − Cost of Revenue
/// 2. Operating Expenses (Total) = R&D + Sales & Marketing + G&A, over
///    whichever are numeric (at least one)
/// 3. Operating Income = Gross Profit − Operating Expenses (Total)
/// 4. Income Before Tax = Operating Income + (Interest Income − Interest
///    Expense) + Other Income, the last three counting as zero when missing
///
/// Rule 3 sees the totals filled by rules 1 and 2. Rule 4 only uses an
/// Operating Income present before any rule ran, never one derived by rule 3.
/// When all four totals are reported, the rules change nothing.
pub fn apply_derivations(income: &mut IncomeStatement) {
    use crate::tags::labels::*;

    let reported_operating = income.profit.number(OPERATING_INCOME);

    if income.profit.is_absent(GROSS_PROFIT)
        && let (Some(revenue), Some(cost)) = (
            income.revenue.number(TOTAL_REVENUE),
            income.expenses.number(COST_OF_REVENUE),
        )
    {
        income.profit.insert(GROSS_PROFIT, LineValue::from(revenue - cost));
        debug!("Derived {}", GROSS_PROFIT);
    }

    if income.expenses.is_absent(OPERATING_EXPENSES) {
        let parts: Vec<f64> = [
            RESEARCH_AND_DEVELOPMENT,
            SALES_AND_MARKETING,
            GENERAL_AND_ADMINISTRATIVE,
        ]
        .iter()
        .filter_map(|label| income.expenses.number(label))
        .collect();
        if !parts.is_empty() {
            income
                .expenses
                .insert(OPERATING_EXPENSES, LineValue::from(parts.iter().sum::<f64>()));
            debug!("Derived {}", OPERATING_EXPENSES);
        }
    }

    if income.profit.is_absent(OPERATING_INCOME)
        && let (Some(gross), Some(opex)) = (
            income.profit.number(GROSS_PROFIT),
            income.expenses.number(OPERATING_EXPENSES),
        )
    {
        income
            .profit
            .insert(OPERATING_INCOME, LineValue::from(gross - opex));
        debug!("Derived {}", OPERATING_INCOME);
    }

    if income.profit.is_absent(INCOME_BEFORE_TAX)
        && let Some(operating) = reported_operating
    {
        let interest_income = income.revenue.number(INTEREST_INCOME).unwrap_or(0.0);
        let interest_expense = income.expenses.number(INTEREST_EXPENSE).unwrap_or(0.0);
        let other_income = income.revenue.number(OTHER_INCOME).unwrap_or(0.0);
        income.profit.insert(
            INCOME_BEFORE_TAX,
            LineValue::from(operating + (interest_income - interest_expense) + other_income),
        );
        debug!("Derived {}", INCOME_BEFORE_TAX);
    }
}

impl EdgarClient {
    async fn fetch_facts(&self, document: &DocumentReference) -> Result<FactIndex> {
        debug!("Fetching XBRL document {}", document);
        let response = self.fetch_ok(document.as_str()).await?;
        FactIndex::parse(&response.body)
    }

    /// Fetches `document` and reads its cash-flow statement.
    ///
    /// # Errors
    /// Returns an error if the document cannot be fetched or is malformed XML.
    #[instrument(skip_all, fields(document = %document))]
    pub async fn extract_cashflow(&self, document: &DocumentReference) -> Result<CashFlowStatement> {
        let facts = self.fetch_facts(document).await?;
        Ok(cashflow_from_facts(&facts))
    }

    /// Fetches `document` and reads its income statement.
    ///
    /// # Errors
    /// Returns an error if the document cannot be fetched or is malformed XML.
    #[instrument(skip_all, fields(document = %document))]
    pub async fn extract_income(&self, document: &DocumentReference) -> Result<IncomeStatement> {
        let facts = self.fetch_facts(document).await?;
        Ok(income_from_facts(&facts))
    }

    /// Fetches `document` once and reads both statements.
    ///
    /// # Errors
    /// Returns an error if the document cannot be fetched or is malformed XML.
    #[instrument(skip_all, fields(document = %document))]
    pub async fn extract_statements(
        &self,
        document: &DocumentReference,
    ) -> Result<ExtractedStatements> {
        let facts = self.fetch_facts(document).await?;
        let statements = ExtractedStatements {
            cashflow: cashflow_from_facts(&facts),
            income_statement: income_from_facts(&facts),
        };
        debug!(
            cashflow = statements.cashflow.present_count(),
            elements = facts.len(),
            "Extracted statements"
        );
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgarConfig;
    use approx::assert_relative_eq;
    use crate::tags::labels::*;
    use rstest::rstest;
    use statements_core::{DataError, StaticTransport};
    use std::sync::Arc;

    fn instance(facts: &[(&str, &str)]) -> String {
        let body: String = facts
            .iter()
            .map(|(name, value)| format!("  <{name} contextRef=\"FY\">{value}</{name}>\n"))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<xbrli:xbrl xmlns:xbrli=\"http://www.xbrl.org/2003/instance\" xmlns:us-gaap=\"http://fasb.org/us-gaap/2024\">\n{body}</xbrli:xbrl>"
        )
    }

    fn facts(pairs: &[(&str, &str)]) -> FactIndex {
        FactIndex::parse(&instance(pairs)).unwrap()
    }

    fn section(pairs: &[(&str, f64)]) -> StatementSection {
        pairs
            .iter()
            .map(|(label, value)| (*label, LineValue::from(*value)))
            .collect()
    }

    #[test]
    fn test_candidates_in_declared_order() {
        let index = facts(&[
            ("us-gaap:SalesRevenueNet", "100"),
            ("us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax", "200"),
        ]);
        let entry = IncomeSection::Revenue.entries()[0];
        assert_eq!(resolve_entry(&index, &entry), LineValue::Number(200.0));
    }

    #[test]
    fn test_empty_candidate_falls_through() {
        let index = facts(&[
            ("us-gaap:Revenues", "  "),
            ("us-gaap:SalesRevenueNet", "300"),
        ]);
        let entry = IncomeSection::Revenue.entries()[0];
        assert_eq!(resolve_entry(&index, &entry), LineValue::Number(300.0));
    }

    #[rstest]
    #[case("1,234,567", LineValue::Number(1_234_567.0))]
    #[case("-42", LineValue::Number(-42.0))]
    #[case(" see note 7 ", LineValue::Text("see note 7".to_string()))]
    fn test_value_parsing(#[case] raw: &str, #[case] expected: LineValue) {
        let index = facts(&[("us-gaap:NetIncomeLoss", raw)]);
        let cashflow = cashflow_from_facts(&index);
        assert_eq!(cashflow.get(NET_PROFIT), Some(&expected));
    }

    #[test]
    fn test_cashflow_has_every_label() {
        let cashflow = cashflow_from_facts(&facts(&[("us-gaap:NetIncomeLoss", "93736000000")]));
        assert_eq!(cashflow.len(), 22);
        assert_eq!(cashflow.present_count(), 1);
        assert!(cashflow.is_absent(CAPITAL_EXPENDITURE));
    }

    #[test]
    fn test_cashflow_in_declared_order() {
        let cashflow = cashflow_from_facts(&facts(&[]));
        let labels: Vec<_> = cashflow.iter().map(|(label, _)| label).collect();
        let declared: Vec<_> = CASH_FLOW.iter().map(|e| e.label).collect();
        assert_eq!(labels, declared);
    }

    #[test]
    fn test_section_names_match_serialized_keys() {
        let income = income_from_facts(&facts(&[("us-gaap:GrossProfit", "5")]));
        let json = serde_json::to_value(&income).unwrap();
        for section in IncomeSection::ALL {
            let values = json[section.name()].as_object().unwrap();
            assert_eq!(values.len(), section.entries().len());
        }

        let profit: Vec<_> = income.profit.iter().map(|(label, _)| label).collect();
        assert_eq!(
            profit,
            [GROSS_PROFIT, OPERATING_INCOME, INCOME_BEFORE_TAX, NET_INCOME]
        );
    }

    #[test]
    fn test_income_has_four_sections() {
        let income = income_from_facts(&facts(&[]));
        assert_eq!(income.revenue.len(), 4);
        assert_eq!(income.expenses.len(), 7);
        assert_eq!(income.profit.len(), 4);
        assert_eq!(income.shares.len(), 4);
        assert!(income.all_absent());
    }

    #[test]
    fn test_derivation_chain() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0), (INTEREST_INCOME, 20.0)]),
            expenses: section(&[
                (COST_OF_REVENUE, 400.0),
                (RESEARCH_AND_DEVELOPMENT, 100.0),
                (GENERAL_AND_ADMINISTRATIVE, 50.0),
                (INTEREST_EXPENSE, 5.0),
            ]),
            ..Default::default()
        };
        apply_derivations(&mut income);

        assert_relative_eq!(income.profit.number(GROSS_PROFIT).unwrap(), 600.0);
        assert_relative_eq!(income.expenses.number(OPERATING_EXPENSES).unwrap(), 150.0);
        assert_relative_eq!(income.profit.number(OPERATING_INCOME).unwrap(), 450.0);
        assert!(income.profit.is_absent(INCOME_BEFORE_TAX));
    }

    #[test]
    fn test_income_before_tax_ignores_derived_operating_income() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0)]),
            expenses: section(&[(COST_OF_REVENUE, 400.0), (RESEARCH_AND_DEVELOPMENT, 100.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);

        assert_eq!(income.profit.number(OPERATING_INCOME), Some(500.0));
        assert!(income.profit.is_absent(INCOME_BEFORE_TAX));
    }

    #[test]
    fn test_income_before_tax_from_reported_operating_income() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0), (INTEREST_INCOME, 20.0)]),
            expenses: section(&[
                (COST_OF_REVENUE, 400.0),
                (RESEARCH_AND_DEVELOPMENT, 100.0),
                (INTEREST_EXPENSE, 5.0),
            ]),
            profit: section(&[(OPERATING_INCOME, 480.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);

        assert_relative_eq!(income.profit.number(GROSS_PROFIT).unwrap(), 600.0);
        assert_relative_eq!(income.profit.number(OPERATING_INCOME).unwrap(), 480.0);
        assert_relative_eq!(income.profit.number(INCOME_BEFORE_TAX).unwrap(), 495.0);
    }

    #[test]
    fn test_derivation_never_overwrites() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0)]),
            expenses: section(&[(COST_OF_REVENUE, 400.0)]),
            profit: section(&[(GROSS_PROFIT, 555.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);
        assert_relative_eq!(income.profit.number(GROSS_PROFIT).unwrap(), 555.0);
    }

    #[test]
    fn test_derivation_idempotent_with_reported_totals() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0), (OTHER_INCOME, -3.0)]),
            expenses: section(&[(COST_OF_REVENUE, 400.0), (SALES_AND_MARKETING, 70.0)]),
            profit: section(&[(OPERATING_INCOME, 530.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);
        let once = income.clone();
        apply_derivations(&mut income);
        assert_eq!(income, once);
        assert_relative_eq!(income.profit.number(INCOME_BEFORE_TAX).unwrap(), 527.0);

        let mut reported = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 10.0)]),
            expenses: section(&[(OPERATING_EXPENSES, 4.0), (COST_OF_REVENUE, 1.0)]),
            profit: section(&[
                (GROSS_PROFIT, 9.0),
                (OPERATING_INCOME, 5.0),
                (INCOME_BEFORE_TAX, 6.0),
            ]),
            ..Default::default()
        };
        let before = reported.clone();
        apply_derivations(&mut reported);
        assert_eq!(reported, before);
    }

    #[rstest]
    #[case(&[(SALES_AND_MARKETING, 70.0)], Some(70.0))]
    #[case(&[(RESEARCH_AND_DEVELOPMENT, 10.0), (SALES_AND_MARKETING, 20.0), (GENERAL_AND_ADMINISTRATIVE, 30.0)], Some(60.0))]
    #[case(&[], None)]
    fn test_operating_expenses_rule(#[case] parts: &[(&str, f64)], #[case] expected: Option<f64>) {
        let mut income = IncomeStatement {
            expenses: section(parts),
            ..Default::default()
        };
        apply_derivations(&mut income);
        assert_eq!(income.expenses.number(OPERATING_EXPENSES), expected);
        if expected.is_none() {
            assert!(income.expenses.is_absent(OPERATING_EXPENSES));
        }
    }

    #[test]
    fn test_gross_profit_needs_both_inputs() {
        let mut income = IncomeStatement {
            revenue: section(&[(TOTAL_REVENUE, 1000.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);
        assert!(income.profit.is_absent(GROSS_PROFIT));
        assert!(income.profit.is_absent(OPERATING_INCOME));
        assert!(income.profit.is_absent(INCOME_BEFORE_TAX));
    }

    #[test]
    fn test_income_before_tax_defaults_adjustments() {
        let mut income = IncomeStatement {
            profit: section(&[(OPERATING_INCOME, 123.0)]),
            ..Default::default()
        };
        apply_derivations(&mut income);
        assert_relative_eq!(income.profit.number(INCOME_BEFORE_TAX).unwrap(), 123.0);
    }

    #[test]
    fn test_text_values_block_derivation_inputs() {
        let index = facts(&[
            ("us-gaap:Revenues", "n/a"),
            ("us-gaap:CostOfRevenue", "400"),
        ]);
        let income = income_from_facts(&index);
        assert_eq!(
            income.revenue.get(TOTAL_REVENUE),
            Some(&LineValue::Text("n/a".to_string()))
        );
        assert!(income.profit.is_absent(GROSS_PROFIT));
    }

    #[tokio::test]
    async fn test_extract_statements_fetches_once() {
        let url = "https://www.sec.gov/Archives/edgar/data/1/000000000124000001/doc_htm.xml";
        let transport = Arc::new(StaticTransport::new().with_body(
            url,
            instance(&[
                ("us-gaap:NetIncomeLoss", "10"),
                ("us-gaap:Revenues", "100"),
                ("us-gaap:CostOfRevenue", "60"),
            ]),
        ));
        let client = EdgarClient::with_transport(transport.clone(), EdgarConfig::default());
        let document = DocumentReference::new(url).unwrap();

        let statements = client.extract_statements(&document).await.unwrap();
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(statements.cashflow.number(NET_PROFIT), Some(10.0));
        assert_eq!(statements.income_statement.profit.number(NET_INCOME), Some(10.0));
        assert_relative_eq!(
            statements.income_statement.profit.number(GROSS_PROFIT).unwrap(),
            40.0
        );

        let cashflow = client.extract_cashflow(&document).await.unwrap();
        assert_eq!(cashflow, statements.cashflow);
        let income = client.extract_income(&document).await.unwrap();
        assert_eq!(income, statements.income_statement);
    }

    #[tokio::test]
    async fn test_missing_document_is_error() {
        let client = EdgarClient::with_transport(
            Arc::new(StaticTransport::new()),
            EdgarConfig::default(),
        );
        let document = DocumentReference::new("https://www.sec.gov/missing.xml").unwrap();
        let err = client.extract_statements(&document).await.unwrap_err();
        assert!(matches!(err, DataError::Http { status: 404, .. }));
    }
}
