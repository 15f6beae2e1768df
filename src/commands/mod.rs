use crate::components::time_slots::{validate_time_slots, Rejection, SlotRequest, ValidationResult};
use crate::config::Config;
use crate::error::{usage_error, PlannerResult};
use tracing::debug;

// Export submodules
pub mod plan;

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute and print a slot plan
    Plan(PlanArgs),
    /// Print the JSON schema of the result
    Schema,
}

/// Arguments of the plan command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanArgs {
    pub start_time: String,
    pub end_time: String,
    pub service_duration: Option<i64>,
    pub break_duration: Option<i64>,
    pub hourly_rate: Option<i64>,
    pub max_participants: Option<i64>,
    pub locale: Option<String>,
    pub json: bool,
}

impl PlanArgs {
    /// Fill gaps from the config and resolve the `now` keyword
    pub fn to_request(&self, config: &Config) -> SlotRequest {
        let hourly_rate = match self.hourly_rate {
            Some(rate) => Some(rate),
            None => config.hourly_rate(),
        };

        SlotRequest {
            start_time: Some(resolve_time(&self.start_time)),
            end_time: Some(resolve_time(&self.end_time)),
            service_duration: self.service_duration.unwrap_or(config.service_duration),
            break_duration: self.break_duration.unwrap_or(config.break_duration),
            hourly_rate,
            max_participants: self.max_participants,
        }
    }
}

fn resolve_time(text: &str) -> String {
    if text.eq_ignore_ascii_case("now") {
        plan::current_time_of_day().to_string()
    } else {
        text.to_string()
    }
}

/// Parse command line arguments, without the program name
pub fn parse_args<I>(args: I) -> PlannerResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut plan = PlanArgs::default();
    let mut schema = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => schema = true,
            "--json" => plan.json = true,
            "--service" => plan.service_duration = Some(number(&arg, args.next())?),
            "--break" => plan.break_duration = Some(number(&arg, args.next())?),
            "--rate" => plan.hourly_rate = Some(number(&arg, args.next())?),
            "--max-participants" => plan.max_participants = Some(number(&arg, args.next())?),
            "--locale" => {
                plan.locale = Some(
                    args.next()
                        .ok_or_else(|| usage_error("--locale needs a value"))?,
                )
            }
            flag if flag.starts_with("--") => {
                return Err(usage_error(&format!("unknown option {}", flag)))
            }
            _ => positional.push(arg),
        }
    }

    if schema {
        return Ok(Command::Schema);
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(start), Some(end), None) => {
            plan.start_time = start;
            plan.end_time = end;
            Ok(Command::Plan(plan))
        }
        _ => Err(usage_error("expected a start time and an end time")),
    }
}

fn number(flag: &str, value: Option<String>) -> PlannerResult<i64> {
    let value = value.ok_or_else(|| usage_error(&format!("{} needs a value", flag)))?;
    value
        .parse::<i64>()
        .map_err(|_| usage_error(&format!("{} expects a whole number, got {:?}", flag, value)))
}

/// Output of a command and the rejection behind it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub rejection: Option<Rejection>,
}

/// Run a parsed command
pub fn execute(command: &Command, config: &Config) -> PlannerResult<Report> {
    match command {
        Command::Schema => Ok(Report {
            output: plan::render_schema()?,
            rejection: None,
        }),
        Command::Plan(args) => {
            let request = args.to_request(config);
            debug!(?request, "Planning time slots");

            let mut result = validate_time_slots(&request);
            if config.hide_earnings {
                if let ValidationResult::Valid(plan) = &mut result {
                    plan.earnings = None;
                }
            }

            let output = if args.json {
                plan::render_json(&result)?
            } else {
                let locale = args.locale.as_deref().unwrap_or(&config.locale);
                plan::render_text(&result, locale, !config.hide_earnings)
            };

            let rejection = match result {
                ValidationResult::Valid(_) => None,
                ValidationResult::Invalid(rejection) => Some(rejection),
            };

            Ok(Report { output, rejection })
        }
    }
}
