//! Invitation and welcome email rendering.

use taskhub_core::config::MailConfig;
use taskhub_core::types::UserId;
use taskhub_worker::queue::EmailMessage;

/// Email asking an invited user to join the inviter's team.
pub fn invitation_email(
    mail: &MailConfig,
    to: &str,
    invited: UserId,
    inviter_name: &str,
) -> EmailMessage {
    let text = format!(
        "Hi,\n\n\
        Please accept this invite to TaskHub, our tool for work management and collaboration.\n\n\
        Using TaskHub, we plan and track projects, discuss ideas, and collaborate to get work done.\n\n\
        Accept invitation\n{client_url}/signup/{invited}\n\n\
        Decline invitation\n{client_url}/decline/{invited}\n\n\
        All the best,\n{inviter_name}\n",
        client_url = mail.client_url,
    );

    EmailMessage {
        to: to.to_string(),
        from_address: mail.from_address.clone(),
        from_name: format!("{inviter_name} at {}", mail.from_name),
        subject: format!("Invitation to {}", mail.from_name),
        text,
    }
}

/// Email asking a self-registered user to finish their signup.
pub fn welcome_email(mail: &MailConfig, to: &str, user: UserId) -> EmailMessage {
    let text = format!(
        "Hi,\n\
        Thank you for choosing {from_name}!\n\
        You are just one click away from completing your account registration.\n\n\
        Confirm your email:\n{client_url}/signup/{user}\n",
        from_name = mail.from_name,
        client_url = mail.client_url,
    );

    EmailMessage {
        to: to.to_string(),
        from_address: mail.from_address.clone(),
        from_name: mail.from_name.clone(),
        subject: "Please complete your registration".to_string(),
        text,
    }
}
