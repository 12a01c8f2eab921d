use crate::app::App;
use colored::Colorize;
use mockview_core::role::RoleProvider;

pub fn list(app: &App) {
    println!("{}", "Available roles:".bright_magenta().bold());
    for name in app.roles.list_role_names() {
        if let Some(role) = app.roles.get_role(&name) {
            println!(
                "  {:<20} {} {}",
                name.bright_cyan(),
                role.display_name,
                format!("({} questions)", role.total_questions()).bright_black()
            );
        }
    }
}
