//! Clock and greeting commands

use chrono::{DateTime, Local, TimeZone, Timelike};

use super::{CommandArgs, CommandHandler, CommandResult};

pub fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("The time is %I:%M %p").to_string()
}

pub fn format_date<Tz: TimeZone>(today: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    today.format("Today is %A, %B %d, %Y").to_string()
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning! How can I help you today?"
    } else if hour < 18 {
        "Good afternoon! What can I do for you?"
    } else {
        "Good evening! How may I assist you?"
    }
}

#[derive(Debug, Default)]
pub struct TimeHandler;

impl CommandHandler for TimeHandler {
    fn execute(&self, _args: &CommandArgs) -> CommandResult<String> {
        Ok(format_time(&Local::now()))
    }
}

#[derive(Debug, Default)]
pub struct DateHandler;

impl CommandHandler for DateHandler {
    fn execute(&self, _args: &CommandArgs) -> CommandResult<String> {
        Ok(format_date(&Local::now()))
    }
}

#[derive(Debug, Default)]
pub struct GreetHandler;

impl CommandHandler for GreetHandler {
    fn execute(&self, _args: &CommandArgs) -> CommandResult<String> {
        Ok(greeting_for_hour(Local::now().hour()).to_string())
    }
}
