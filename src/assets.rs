/// How long a clicked card pulses
pub const PULSE_DURATION_MS: u32 = 500;

/// Client-side click effect for the grid. Link cards navigate as usual; other
/// cards play the `pulse` animation once.
pub fn card_script() -> String {
    format!(
        r#"document.addEventListener("DOMContentLoaded", function () {{
  document.querySelectorAll(".area-card").forEach(function (card) {{
    card.addEventListener("click", function () {{
      if (card.tagName === "A") {{
        return;
      }}
      card.style.animation = "pulse {secs}s ease";
      setTimeout(function () {{
        card.style.animation = "";
      }}, {ms});
    }});
  }});
}});
"#,
        secs = f64::from(PULSE_DURATION_MS) / 1000.0,
        ms = PULSE_DURATION_MS,
    )
}
