mod dash_text;
mod error_text;
mod format;
mod json;
mod mode;
mod records_text;
mod session_text;

use std::io;

use paydash_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, infer_requested_output_mode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let data = &success.data;
    match success.command.as_str() {
        "dash" => dash_text::render_dash(data),
        "stats" => dash_text::render_stats(data),
        "report" => dash_text::render_report(data),
        "charts" => dash_text::render_charts(data),
        "transactions list" => records_text::render_transaction_list(data),
        "transactions export" => records_text::render_transaction_export(data),
        "transactions remove" => records_text::render_transaction_remove(data),
        "payment add" => records_text::render_payment_add(data),
        "users list" => records_text::render_user_list(data),
        "users add" => records_text::render_user_add(data),
        "users remove" => records_text::render_user_remove(data),
        "session login" | "session show" | "session update" => session_text::render_session(&success.command, data),
        "session logout" => Ok(session_text::render_logout(data)),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
