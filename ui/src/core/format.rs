//! Formatting helpers for presenting plans, files and exports.

use base64::Engine;

use api::FilePayload;

pub fn currency_symbol(currency: &str) -> String {
    match currency.to_ascii_lowercase().as_str() {
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        other => format!("{} ", other.to_ascii_uppercase()),
    }
}

/// Whole-unit price as shown on plan cards, e.g. `$29`.
pub fn format_price(price: f64, currency: &str) -> String {
    format!("{}{price:.0}", currency_symbol(currency))
}

/// `data:` URL used for the in-page image preview.
pub fn data_url(file: &FilePayload) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
    format!("data:{};base64,{encoded}", file.mime)
}

/// Download name for a rendered export of `original`.
pub fn export_filename(original: &str) -> String {
    format!("translated_{original}.png")
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < KB * KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rounds_to_whole_units() {
        assert_eq!(format_price(9.99, "usd"), "$10");
        assert_eq!(format_price(0.0, "USD"), "$0");
        assert_eq!(format_price(29.0, "eur"), "€29");
        assert_eq!(format_price(5.0, "chf"), "CHF 5");
    }

    #[test]
    fn data_url_carries_mime() {
        let file = FilePayload::new("a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(data_url(&file), "data:image/png;base64,AQID");
    }

    #[test]
    fn export_name_keeps_original_extension() {
        assert_eq!(export_filename("menu.jpg"), "translated_menu.jpg.png");
    }

    #[test]
    fn sizes_scale() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
