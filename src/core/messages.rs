//! User-facing message templates. The engine reports every validation
//! failure as rendered text, so transports only print what they receive.

use crate::core::query::QueryError;
use crate::core::rates::RateTable;

/// Fixed prefix of every validation failure.
pub const ERROR_HEADER: &str = "Could not process the query.";

/// Reminder of the accepted query shapes, shown by the `usage` subcommand
/// and attached to grammar failures.
pub const QUERY_FORMAT: &str = "Query format:
  CODE              price of one unit in rubles, e.g. \"USD\"
  AMOUNT CODE       value of the amount in rubles, e.g. \"10 USD\"
  FROM TO           price of one unit of FROM in TO, e.g. \"USD EUR\"
  AMOUNT FROM TO    convert the amount from FROM to TO, e.g. \"10 USD EUR\"";

/// Ordered code/name listing of a snapshot, attached to unknown-currency
/// failures.
pub fn values_message(rates: &RateTable) -> String {
    let mut message = String::from("Available currencies:");
    for info in rates.entries() {
        message.push_str(&format!("\n  {}: {}", info.code, info.name));
    }
    message
}

/// Renders a validation failure: the fixed header, a specific explanation,
/// then the usage block or the currency listing where the failure calls for
/// one. Negative amounts carry no usage block; the shape was fine, only the
/// sign was not.
pub fn render_query_error(error: &QueryError, rates: Option<&RateTable>) -> String {
    match error {
        QueryError::Empty => format!("{ERROR_HEADER} The query is empty.\n\n{QUERY_FORMAT}"),
        QueryError::TooManyArguments(count) => format!(
            "{ERROR_HEADER} A query takes at most 3 arguments, got {count}.\n\n{QUERY_FORMAT}"
        ),
        QueryError::InvalidAmount(token) => format!(
            "{ERROR_HEADER} The amount to convert must be a number, not \"{token}\".\n\n{QUERY_FORMAT}"
        ),
        QueryError::NegativeAmount(token) => {
            format!("{ERROR_HEADER} A negative amount of currency cannot be requested: {token}")
        }
        QueryError::UnknownCurrency(code) => match rates {
            Some(rates) => format!(
                "{ERROR_HEADER} \"{code}\" is not in the daily rate listing.\n\n{}",
                values_message(rates)
            ),
            None => format!("{ERROR_HEADER} \"{code}\" is not in the daily rate listing."),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::CurrencyInfo;

    fn rates() -> RateTable {
        let mut rates = RateTable::new(None);
        rates.insert(CurrencyInfo {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            rate: 90.0,
        });
        rates.insert_rub();
        rates
    }

    #[test]
    fn grammar_failures_carry_the_header_and_usage_block() {
        let message = render_query_error(&QueryError::TooManyArguments(5), None);
        assert!(message.starts_with(ERROR_HEADER));
        assert!(message.contains("got 5"));
        assert!(message.contains(QUERY_FORMAT));

        let message = render_query_error(&QueryError::InvalidAmount("ten".to_string()), None);
        assert!(message.contains("\"ten\""));
        assert!(message.contains(QUERY_FORMAT));
    }

    #[test]
    fn negative_amount_has_no_usage_block() {
        let message = render_query_error(&QueryError::NegativeAmount("-5".to_string()), None);
        assert!(message.starts_with(ERROR_HEADER));
        assert!(message.contains("-5"));
        assert!(!message.contains(QUERY_FORMAT));
    }

    #[test]
    fn unknown_currency_lists_the_snapshot_in_order() {
        let message =
            render_query_error(&QueryError::UnknownCurrency("XXX".to_string()), Some(&rates()));
        assert!(message.contains("\"XXX\""));

        let usd = message.find("USD: US Dollar").expect("USD entry missing");
        let rub = message.find("RUB: Russian Ruble").expect("RUB entry missing");
        assert!(usd < rub);
    }
}
