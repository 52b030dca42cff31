//! Annual filing discovery from the submissions API.

use chrono::NaiveDate;
use serde::Deserialize;
use statements_core::{Cik, FilingReference, Result};
use tracing::{debug, instrument, warn};

use crate::client::EdgarClient;
use crate::config::SelectionPolicy;

/// Submissions document, reduced to the filing history.
#[derive(Debug, Deserialize)]
struct CompanySubmissions {
    filings: FilingHistory,
}

#[derive(Debug, Deserialize)]
struct FilingHistory {
    recent: RecentFilings,
}

/// Recent filings as parallel arrays; index `i` of each array describes the
/// same filing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    accession_number: Vec<String>,
    form: Vec<String>,
    filing_date: Vec<String>,
    #[serde(default)]
    report_date: Vec<String>,
}

/// One row of the recent filings table.
#[derive(Debug)]
struct FilingRow<'a> {
    accession_number: &'a str,
    form: &'a str,
    filing_date: Option<NaiveDate>,
    report_date: Option<NaiveDate>,
}

impl RecentFilings {
    /// Zips the parallel arrays. Rows stop at the shortest mandatory array;
    /// a short or missing `reportDate` array leaves report dates unset.
    fn rows(&self) -> impl Iterator<Item = FilingRow<'_>> {
        self.form
            .iter()
            .zip(&self.accession_number)
            .zip(&self.filing_date)
            .enumerate()
            .map(|(i, ((form, accession), filing_date))| FilingRow {
                accession_number: accession,
                form,
                filing_date: parse_date(filing_date),
                report_date: self.report_date.get(i).and_then(|d| parse_date(d)),
            })
    }
}

/// Parses an ISO date, treating blanks as absent.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Failed to parse date '{}': {}", raw, e);
            None
        }
    }
}

/// Picks the filing to report according to `policy`.
fn select<'a, I>(mut rows: I, policy: SelectionPolicy) -> Option<FilingRow<'a>>
where
    I: Iterator<Item = FilingRow<'a>>,
{
    match policy {
        SelectionPolicy::ScanOrder => rows.next(),
        SelectionPolicy::LatestFilingDate => {
            let mut best: Option<FilingRow<'a>> = None;
            for row in rows {
                let replace = match &best {
                    None => true,
                    Some(current) => match (row.filing_date, current.filing_date) {
                        (Some(candidate), Some(held)) => candidate > held,
                        (Some(_), None) => true,
                        _ => false,
                    },
                };
                if replace {
                    best = Some(row);
                }
            }
            best
        }
    }
}

impl EdgarClient {
    /// Finds the latest annual filing of the configured form type.
    ///
    /// Returns `Ok(None)` if the registrant has no such filing in its recent
    /// history.
    ///
    /// # Errors
    /// Returns an error if the submissions request fails, answers non-2xx, or
    /// cannot be decoded.
    #[instrument(skip_all, fields(cik = %cik))]
    pub async fn latest_annual_filing(&self, cik: &Cik) -> Result<Option<FilingReference>> {
        let config = self.config();
        let url = config.submissions_url(cik.as_str());

        debug!("Fetching company submissions from {}", url);
        let submissions: CompanySubmissions = self.fetch_ok(&url).await?.json()?;
        let recent = submissions.filings.recent;

        let form = config.annual_form;
        let matching = recent.rows().filter(|row| form.matches(row.form));

        let Some(row) = select(matching, config.selection) else {
            debug!("No {} filing in recent history", form);
            return Ok(None);
        };

        let filing = FilingReference {
            index_url: config.filing_index_url(cik, row.accession_number),
            accession_number: row.accession_number.to_string(),
            form: row.form.to_string(),
            filing_date: row.filing_date,
            report_date: row.report_date,
        };
        debug!(
            accession = %filing.accession_number,
            filing_date = ?filing.filing_date,
            "Selected annual filing"
        );
        Ok(Some(filing))
    }
}
