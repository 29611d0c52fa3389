//! Plain-text rendering of the delivery view.

use std::fmt;

use checkout_delivery::{DeliveryMode, DeliveryView, MethodSummary};

const SELECT_PLACEHOLDER: &str = "Choose delivery option";

/// Terminal layout of a [`DeliveryView`].
struct Rendered<'a>(&'a DeliveryView);

fn write_confirmed(f: &mut fmt::Formatter<'_>, confirmed: &[MethodSummary]) -> fmt::Result {
    for method in confirmed {
        writeln!(f, "  Method: {}", method.line())?;
    }
    Ok(())
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        if let Some(notice) = &view.blocking_notice {
            writeln!(f, "!! {}", notice.heading())?;
            writeln!(f, "!! {}", notice.title())?;
            writeln!(f, "!! {}", notice.body())?;
            writeln!(f, "!! (close returns to {})", notice.close_href())?;
            writeln!(f)?;
        }

        let check = if view.completed { " [done]" } else { "" };
        writeln!(f, "Delivery{check}")?;

        match &view.mode {
            DeliveryMode::Editing {
                groups,
                confirmed,
                error,
                can_continue,
                loading,
            } => {
                for group in groups {
                    writeln!(f, "\n{}", group.heading)?;
                    writeln!(f, "  ({SELECT_PLACEHOLDER})")?;
                    for option in &group.options {
                        writeln!(f, "  [{}] {}", option.id, option.label())?;
                    }
                }
                if !confirmed.is_empty() {
                    writeln!(f)?;
                    write_confirmed(f, confirmed)?;
                }
                if let Some(error) = error {
                    writeln!(f, "\nerror: {error}")?;
                }
                let state = match (*can_continue, *loading) {
                    (_, true) => "loading",
                    (true, false) => "ready",
                    (false, false) => "disabled",
                };
                writeln!(f, "\nContinue to payment ({state})")
            }
            DeliveryMode::Summary { confirmed } => write_confirmed(f, confirmed),
        }
    }
}

pub(crate) fn render_view(view: &DeliveryView) -> String {
    Rendered(view).to_string()
}
