use super::ui;
use crate::core::aggregate::{format_conversion, format_rate};
use crate::core::currency::CurrencyCode;
use crate::core::input::parse_amount;
use crate::core::rates::RateTable;
use crate::core::Converter;
use anyhow::Result;
use comfy_table::Cell;

/// Converts `amount` and renders the result with the rate that was applied.
pub fn run(converter: &Converter, amount: &str, from: &str, to: &str) -> Result<String> {
    let amount = parse_amount(amount)?;
    let from: CurrencyCode = from.parse()?;
    let to: CurrencyCode = to.parse()?;

    let converted = converter.convert(amount, from, to);
    let rate = converter.rate(from, to);

    Ok(format!(
        "{}\n{}",
        ui::style_text(
            &format_conversion(amount, from, converted, to),
            ui::StyleType::TotalValue
        ),
        ui::style_text(&format_rate(from, rate, to), ui::StyleType::Subtle)
    ))
}

pub fn display_rates(rates: &RateTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);
    for (from, to, rate) in rates.entries() {
        table.add_row(vec![
            Cell::new(from),
            Cell::new(to),
            ui::number_cell(format!("{rate:.4}")),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Exchange rates", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputError;

    #[test]
    fn test_run_renders_conversion_and_rate() {
        let output = run(&Converter::default(), "100", "EUR", "usd").unwrap();
        assert!(output.contains("100.00 EUR = 108.00 USD"));
        assert!(output.contains("Rate: 1 EUR = 1.0800 USD"));
    }

    #[test]
    fn test_run_same_currency() {
        let output = run(&Converter::default(), "50", "GBP", "GBP").unwrap();
        assert!(output.contains("50.00 GBP = 50.00 GBP"));
        assert!(output.contains("Rate: 1 GBP = 1.0000 GBP"));
    }

    #[test]
    fn test_run_rejects_blank_amount_and_unknown_currency() {
        let blank = run(&Converter::default(), " ", "EUR", "USD").unwrap_err();
        assert_eq!(
            blank.downcast_ref::<InputError>(),
            Some(&InputError::BlankAmount)
        );

        let unknown = run(&Converter::default(), "1", "EUR", "JPY").unwrap_err();
        assert!(matches!(
            unknown.downcast_ref::<InputError>(),
            Some(InputError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_display_rates_lists_every_pair() {
        let output = display_rates(&RateTable::default());
        assert!(output.contains("Exchange rates"));
        assert!(output.contains("1.0800"));
        assert!(output.contains("3.4500"));
    }
}
