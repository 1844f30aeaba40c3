//! `add` command: preview, submit, then show the refreshed dashboard.

use stockr_client::SubmitOutcome;
use stockr_core::{AppConfig, ItemForm};

use crate::render;

/// Submits `form` to the backend.
///
/// The break-even preview is printed first. On success the refreshed
/// dashboard is printed. On failure the form is printed back exactly as
/// entered together with the error, and the command exits non-zero.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the form is invalid, or
/// the backend rejects the submission. A refresh failure after a successful
/// create is reported but not treated as an error, since the item was saved.
pub(crate) async fn run_add(config: &AppConfig, mut form: ItemForm) -> anyhow::Result<()> {
    println!("{}", render::breakeven_line(&config.pricing, &form.purchase_price));

    let mut dashboard = crate::connect(config)?;
    let name = form.name.clone();

    match dashboard.submit(&mut form).await {
        Ok(SubmitOutcome::Refreshed) => {
            println!("Item hinzugefügt: {name}\n");
            println!("{}", render::dashboard(&dashboard));
            Ok(())
        }
        Ok(SubmitOutcome::RefreshFailed(e)) => {
            println!("Item hinzugefügt: {name}");
            eprintln!("warning: item saved but the dashboard could not be refreshed: {e}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}\n", render::form_summary(&form, &config.pricing));
            Err(anyhow::Error::new(e).context(format!("failed to add '{name}'")))
        }
    }
}
