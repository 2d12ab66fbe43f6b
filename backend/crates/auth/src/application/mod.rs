pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod user_admin;

pub use check_session::CheckSessionUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use user_admin::{CreateUserInput, UpdateUserInput, UserAdminUseCase};
