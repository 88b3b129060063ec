use dioxus::prelude::*;
use views::{
    Connect, CourseDetail, Courses, Profile, ProjectDetail, Projects, Resources, SignIn, SignUp,
    TabLayout,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(TabLayout)]
        #[route("/")]
        Courses {},
        #[route("/resources")]
        Resources {},
        #[route("/connect")]
        Connect {},
        #[route("/projects")]
        Projects {},
    #[end_layout]
    #[route("/courses/:course_id")]
    CourseDetail { course_id: String },
    #[route("/projects/:project_id")]
    ProjectDetail { project_id: String },
    #[route("/sign-in")]
    SignIn {},
    #[route("/sign-up")]
    SignUp {},
    #[route("/profile")]
    Profile {},
}

fn main() {
    dioxus::logger::initialize_default();

    // Without the identity key nothing on the device can sign in.
    let config = match api::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let services = match ui::Services::from_config(&config) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("Failed to set up backend clients: {}", e);
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new().with_context(services).launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::AuthProvider {
            Router::<Route> {}
        }
    }
}
