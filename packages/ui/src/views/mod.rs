mod connect;
pub use connect::ConnectView;

mod course_detail;
pub use course_detail::CourseDetailView;

mod courses;
pub use courses::{CoursesView, Greeting, Lessons};

mod profile;
pub use profile::ProfileView;

mod project_detail;
pub use project_detail::ProjectDetailView;

mod projects;
pub use projects::ProjectsView;

mod resources;
pub use resources::ResourcesView;

mod sign_in;
pub use sign_in::SignInView;

mod sign_up;
pub use sign_up::SignUpView;
