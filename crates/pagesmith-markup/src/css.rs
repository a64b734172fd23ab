//! Stylesheet generation.

use crate::escape::css_value;
use pagesmith_core::{DesignTokens, TokenCategory};

const FONT_FALLBACK_STACK: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";

/// One `:root` block with a commented group of custom properties per token category.
pub fn token_css(tokens: &DesignTokens) -> String {
    let mut css = String::from(":root {\n");

    for (i, category) in TokenCategory::ALL.iter().enumerate() {
        if i > 0 {
            css.push('\n');
        }
        css.push_str(&format!("  /* {} */\n", category.label()));
        for (name, value) in tokens.variables(*category) {
            let value = css_value(value);
            if *category == TokenCategory::Typography {
                css.push_str(&format!("  {}: {}, {};\n", name, value, FONT_FALLBACK_STACK));
            } else {
                css.push_str(&format!("  {}: {};\n", name, value));
            }
        }
    }

    css.push('}');
    css
}

/// Reset, typography, buttons, cards and layout utilities.
pub const GLOBAL_STYLES: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

html {
  scroll-behavior: smooth;
}

body {
  font-family: var(--font-body);
  color: var(--color-text);
  background-color: var(--color-background);
  line-height: 1.6;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
}

section {
  padding: var(--space-xl) var(--space-lg);
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  justify-content: center;
}

h1, h2, h3, h4, h5, h6 {
  font-family: var(--font-heading);
  line-height: 1.2;
  margin-bottom: var(--space-sm);
}

h1 { font-size: clamp(2rem, 5vw, 3.5rem); }
h2 { font-size: clamp(1.5rem, 4vw, 2.5rem); }
h3 { font-size: clamp(1.25rem, 3vw, 2rem); }

p {
  margin-bottom: var(--space-sm);
  font-size: clamp(1rem, 2vw, 1.125rem);
}

a {
  color: var(--color-primary);
  text-decoration: none;
  transition: color 0.3s ease;
}

a:hover {
  color: var(--color-secondary);
}

button, .btn {
  padding: var(--space-sm) var(--space-md);
  background-color: var(--color-primary);
  color: white;
  border: none;
  border-radius: var(--radius-md);
  font-size: 1rem;
  font-weight: 600;
  cursor: pointer;
  transition: all 0.3s ease;
  display: inline-block;
  min-height: 44px;
}

button:hover, .btn:hover {
  background-color: var(--color-secondary);
  transform: translateY(-2px);
  box-shadow: 0 10px 25px rgba(0, 0, 0, 0.15);
}

img {
  max-width: 100%;
  height: auto;
  display: block;
}

.icon {
  width: 24px;
  height: 24px;
  color: var(--color-accent);
}

.card {
  background: white;
  border-radius: var(--radius-lg);
  padding: var(--space-md);
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
  transition: all 0.3s ease;
}

.card:hover {
  transform: translateY(-4px);
  box-shadow: 0 12px 24px rgba(0, 0, 0, 0.15);
}

.container {
  max-width: 1200px;
  margin: 0 auto;
  padding: 0 var(--space-md);
}

.flex {
  display: flex;
  gap: var(--space-md);
}

.grid {
  display: grid;
  gap: var(--space-md);
}

@media (min-width: 768px) {
  .grid { grid-template-columns: repeat(2, 1fr); }
}

@media (min-width: 1024px) {
  .grid { grid-template-columns: repeat(3, 1fr); }
}

@media (max-width: 767px) {
  section {
    padding: var(--space-lg) var(--space-md);
    min-height: auto;
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_block() {
        let css = token_css(&DesignTokens::default());
        assert!(css.starts_with(":root {\n  /* Colors */\n  --color-primary: #6366F1;\n"));
        assert!(css.contains("  --font-heading: Inter, -apple-system"));
        assert!(css.contains("  /* Border Radius */\n  --radius-sm: 0.25rem;\n"));
        assert!(css.ends_with("--radius-lg: 1rem;\n}"));
    }

    #[test]
    fn test_token_values_cannot_break_out() {
        let tokens = DesignTokens {
            color_primary: "red; } body { display: none".to_string(),
            ..Default::default()
        };
        let css = token_css(&tokens);
        assert_eq!(css.matches('{').count(), 1);
        assert_eq!(css.matches('}').count(), 1);
    }
}
