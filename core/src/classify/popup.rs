/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Popup markup for one event. The place name is feed data and is escaped.
pub fn popup_text(place: &str, magnitude: f64) -> String {
    format!(
        "<h3>{}</h3><hr><p>Earthquake Magnitude: {}</p>",
        escape_html(place),
        magnitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_place_names() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'co'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;co&#39;"
        );
    }

    #[test]
    fn plain_place_names_pass_through() {
        assert_eq!(escape_html("10km N of Town"), "10km N of Town");
    }

    #[test]
    fn popup_contains_place_and_magnitude() {
        let text = popup_text("10km N of Town", 5.2);
        assert_eq!(
            text,
            "<h3>10km N of Town</h3><hr><p>Earthquake Magnitude: 5.2</p>"
        );
    }

    #[test]
    fn whole_magnitudes_print_without_fraction() {
        assert!(popup_text("x", 5.0).ends_with("Magnitude: 5</p>"));
        assert!(popup_text("x", -0.5).ends_with("Magnitude: -0.5</p>"));
    }
}
