// Email bodies for the three fan-outs.
//
// Responsibilities
// - Build subject, plain text, and HTML for each message.
// - Escape every caller supplied value placed into HTML.
// - List at most MAX_LISTED_TASKS records and summarise the rest.

use crate::shared::core::formatting::{escape_html, format_amount};
use std::fmt::Write;

pub const MAX_LISTED_TASKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// One payment as it appears in a task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskLine {
    pub recipient_name: String,
    pub account_number: String,
    pub bank_code: String,
    pub amount: f64,
}

pub fn total_amount(tasks: &[TaskLine]) -> f64 {
    tasks.iter().map(|task| task.amount).sum()
}

fn task_list_html(tasks: &[TaskLine], more_label: &str) -> String {
    let mut html = String::new();
    for task in tasks.iter().take(MAX_LISTED_TASKS) {
        let _ = write!(
            html,
            "<div class=\"task-item\"><strong>{}</strong><br>Account: {} | Bank: {}<br>Amount: <span class=\"amount\">{}</span></div>",
            escape_html(&task.recipient_name),
            escape_html(&task.account_number),
            escape_html(&task.bank_code),
            format_amount(task.amount),
        );
    }
    if tasks.len() > MAX_LISTED_TASKS {
        let _ = write!(
            html,
            "<div class=\"task-item\"><em>... and {} more {more_label}</em></div>",
            tasks.len() - MAX_LISTED_TASKS
        );
    }
    html
}

fn task_list_text(tasks: &[TaskLine], more_label: &str) -> String {
    let mut text = String::new();
    for task in tasks.iter().take(MAX_LISTED_TASKS) {
        let _ = writeln!(
            text,
            "- {} (Account: {} | Bank: {}) {}",
            task.recipient_name,
            task.account_number,
            task.bank_code,
            format_amount(task.amount)
        );
    }
    if tasks.len() > MAX_LISTED_TASKS {
        let _ = writeln!(text, "... and {} more {more_label}", tasks.len() - MAX_LISTED_TASKS);
    }
    text
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><div class=\"container\">{body}\
         <div class=\"footer\"><p>This is an automated message. Please do not reply to this email.</p></div>\
         </div></body></html>"
    )
}

pub fn task_assignment(distributor_name: &str, date: &str, tasks: &[TaskLine], app_url: &str) -> EmailTemplate {
    let total = format_amount(total_amount(tasks));
    let count = tasks.len();
    let body = format!(
        "<h1>New Payment Tasks Assigned</h1>\
         <h2>Hello {name},</h2>\
         <p>You have been assigned <strong>{count} new payment tasks</strong> for <strong>{date}</strong>.</p>\
         <ul><li><strong>Total Tasks:</strong> {count}</li><li><strong>Date:</strong> {date}</li>\
         <li><strong>Total Amount:</strong> {total}</li><li><strong>Status:</strong> Pending</li></ul>\
         <div class=\"task-list\">{list}</div>\
         <p><a href=\"{url}/distributor/dashboard\" class=\"btn\">View Tasks in Dashboard</a></p>\
         <p><strong>Important:</strong> Please complete all assigned tasks by end of day.</p>",
        name = escape_html(distributor_name),
        date = escape_html(date),
        list = task_list_html(tasks, "tasks"),
        url = escape_html(app_url),
    );
    EmailTemplate {
        subject: format!("New Payment Tasks Assigned - {date}"),
        text: format!(
            "Hello {distributor_name},\n\nYou have been assigned {count} new payment tasks for {date}.\n\n{}\nPlease log in to your dashboard to view and process these tasks.\n\nTotal Amount: {total}\n\nBest regards,\nPaySplitr System",
            task_list_text(tasks, "tasks")
        ),
        html: layout("New Tasks Assigned", &body),
    }
}

/// Percentage of completed tasks, formatted with one decimal.
pub fn completion_rate_label(completed: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", completed as f64 / total as f64 * 100.0)
}

pub fn admin_task_completion(
    distributor_name: &str,
    distributor_email: &str,
    completed: usize,
    total: usize,
    date: &str,
    app_url: &str,
) -> EmailTemplate {
    let rate = completion_rate_label(completed, total);
    let body = format!(
        "<h1>Task Completion Update</h1>\
         <p><strong>{name}</strong> has completed their assigned tasks for <strong>{date}</strong>.</p>\
         <ul><li><strong>Distributor:</strong> {name} ({email})</li><li><strong>Date:</strong> {date}</li>\
         <li><strong>Completed:</strong> {completed} of {total} tasks</li>\
         <li><strong>Completion Rate:</strong> {rate}</li></ul>\
         <p><a href=\"{url}/admin/distributors\" class=\"btn\">View Distributor Performance</a></p>\
         <p><em>This notification was sent because the distributor has completed all assigned tasks for the day.</em></p>",
        name = escape_html(distributor_name),
        email = escape_html(distributor_email),
        date = escape_html(date),
        url = escape_html(app_url),
    );
    EmailTemplate {
        subject: format!("Task Completion Update - {distributor_name}"),
        text: format!(
            "Task Completion Update\n\n{distributor_name} has completed {completed} of {total} tasks for {date}.\n\nCompletion Rate: {rate}\n\nBest regards,\nPaySplitr System"
        ),
        html: layout("Task Completion Update", &body),
    }
}

pub fn incomplete_reminder(distributor_name: &str, date: &str, tasks: &[TaskLine], app_url: &str) -> EmailTemplate {
    let total = format_amount(total_amount(tasks));
    let count = tasks.len();
    let body = format!(
        "<h1>Incomplete Tasks Reminder</h1>\
         <h2>Hello {name},</h2>\
         <div class=\"urgent\"><h3>URGENT: Incomplete Tasks Detected</h3>\
         <p>You have <strong>{count} incomplete tasks</strong> from <strong>{date}</strong> that require immediate attention.</p></div>\
         <ul><li><strong>Incomplete Tasks:</strong> {count}</li><li><strong>Original Date:</strong> {date}</li>\
         <li><strong>Total Amount:</strong> {total}</li><li><strong>Status:</strong> Overdue</li></ul>\
         <div class=\"overdue-list\">{list}</div>\
         <p><a href=\"{url}/distributor/dashboard\" class=\"btn\">Complete Overdue Tasks Now</a></p>",
        name = escape_html(distributor_name),
        date = escape_html(date),
        list = task_list_html(tasks, "overdue tasks"),
        url = escape_html(app_url),
    );
    EmailTemplate {
        subject: format!("Incomplete Tasks Reminder - {date}"),
        text: format!(
            "URGENT: Incomplete Tasks Reminder\n\nHello {distributor_name},\n\nYou have {count} incomplete tasks from {date} that require immediate attention.\n\n{}\nTotal Amount: {total}\n\nPlease log in to your dashboard and complete these overdue tasks immediately.\n\nBest regards,\nPaySplitr System",
            task_list_text(tasks, "overdue tasks")
        ),
        html: layout("Incomplete Tasks Reminder", &body),
    }
}
