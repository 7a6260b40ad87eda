//! Countdown text rendering.
//!
//! The window content is a plain template. Tokens are replaced literally,
//! one after another and each globally, in this order: `{EventName}`,
//! `{Days}`, `{Hours}`, `{Mins}`, `{Seconds}`. Anything else, including
//! unknown `{...}` sequences, passes through unchanged.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::color::TextColor;
use crate::remaining::RemainingTime;
use crate::settings::Settings;

/// Font family used for the countdown label.
pub const FONT_FAMILY: &str = "Arial";

pub const TOKEN_EVENT_NAME: &str = "{EventName}";
pub const TOKEN_DAYS: &str = "{Days}";
pub const TOKEN_HOURS: &str = "{Hours}";
pub const TOKEN_MINS: &str = "{Mins}";
pub const TOKEN_SECONDS: &str = "{Seconds}";

/// What the host paints on every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub text: String,
    pub font_family: &'static str,
    pub font_size: u32,
    pub color: TextColor,
}

/// Renders the window content for the given instant.
pub fn render<Tz: TimeZone>(settings: &Settings, now: &DateTime<Tz>) -> String {
    let remaining = RemainingTime::between(&settings.target_time, now);
    fill_template(&settings.window_content, &settings.event_name, &remaining)
}

/// Builds the full label: rendered text plus font and color.
pub fn label<Tz: TimeZone>(settings: &Settings, now: &DateTime<Tz>) -> Label {
    Label {
        text: render(settings, now),
        font_family: FONT_FAMILY,
        font_size: settings.font_size,
        color: settings.text_color,
    }
}

fn fill_template(template: &str, event_name: &str, remaining: &RemainingTime) -> String {
    template
        .replace(TOKEN_EVENT_NAME, event_name)
        .replace(TOKEN_DAYS, &remaining.days.to_string())
        .replace(TOKEN_HOURS, &remaining.hours.to_string())
        .replace(TOKEN_MINS, &remaining.minutes.to_string())
        .replace(TOKEN_SECONDS, &remaining.seconds.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use insta::assert_snapshot;

    fn fixed_now() -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn settings(content: &str) -> Settings {
        Settings::parse(content).unwrap()
    }

    #[test]
    fn launch_scenario() {
        let settings = settings(
            "EventName=Launch\n\
             TargetTime=1700090061\n\
             WindowContent={EventName}: {Days}d {Hours}h {Mins}m {Seconds}s\n",
        );
        assert_eq!(render(&settings, &fixed_now()), "Launch: 1d 1h 1m 1s");
    }

    #[test]
    fn five_seconds_past_target() {
        let settings = settings(
            "EventName=Launch\n\
             TargetTime=1699999995\n\
             WindowContent={EventName}: {Days}d {Hours}h {Mins}m {Seconds}s\n",
        );
        assert_snapshot!(render(&settings, &fixed_now()), @"Launch: 0d 0h 0m -5s");
    }

    #[test]
    fn a_day_and_more_past_target() {
        let settings = settings(
            "TargetTime=1699909939\n\
             WindowContent={Days}d {Hours}h {Mins}m {Seconds}s\n",
        );
        assert_snapshot!(render(&settings, &fixed_now()), @"-1d -1h -1m -1s");
    }

    #[test]
    fn repeated_tokens_are_all_replaced() {
        let settings = settings("EventName=Launch\nWindowContent={EventName}{EventName}");
        assert_eq!(render(&settings, &fixed_now()), "LaunchLaunch");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let settings = settings(
            "TargetTime=1700000060\n\
             WindowContent={Weeks} {Mins} {mins} {Seconds\n",
        );
        assert_snapshot!(render(&settings, &fixed_now()), @"{Weeks} 1 {mins} {Seconds");
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        let settings = settings("WindowContent=Happy new year!");
        assert_eq!(render(&settings, &fixed_now()), "Happy new year!");
    }

    #[test]
    fn event_name_is_substituted_before_counters() {
        // An event name that looks like a token is expanded by later passes.
        let settings = settings(
            "EventName=T-{Days}\n\
             TargetTime=1700172800\n\
             WindowContent={EventName}\n",
        );
        assert_eq!(render(&settings, &fixed_now()), "T-2");
    }

    #[test]
    fn render_is_idempotent() {
        let settings = settings(
            "EventName=Launch\n\
             TargetTime=1700003723\n\
             WindowContent={EventName} {Hours}:{Mins}:{Seconds}\n",
        );
        let now = fixed_now();
        let first = render(&settings, &now);
        assert_eq!(first, render(&settings, &now));
        assert_snapshot!(first, @"Launch 1:2:3");
    }

    #[test]
    fn countdown_advances_with_time() {
        let settings = settings("TargetTime=1700000010\nWindowContent={Seconds}");
        let now = fixed_now();
        assert_eq!(render(&settings, &now), "10");
        assert_eq!(render(&settings, &(now + Duration::seconds(4))), "6");
    }

    #[test]
    fn label_carries_font_and_color() {
        let settings = settings(
            "TargetTime=1700000001\n\
             WindowContent={Seconds}s\n\
             FontSize=28\n\
             TextColor=#00FF00\n",
        );
        let label = label(&settings, &fixed_now());
        assert_eq!(
            label,
            Label {
                text: "1s".to_string(),
                font_family: FONT_FAMILY,
                font_size: 28,
                color: TextColor::rgb(0, 255, 0),
            }
        );
    }

    #[test]
    fn label_serializes_for_the_webview() {
        let settings = settings("WindowContent=hi\nFontSize=12\nTextColor=red");
        let json = serde_json::to_value(label(&settings, &fixed_now())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "hi",
                "fontFamily": "Arial",
                "fontSize": 12,
                "color": "#ff0000",
            })
        );
    }
}
