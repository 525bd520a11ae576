//! # Janua
//!
//! `janua` is a small user registration and authentication service. It exposes
//! three endpoints: `POST /auth/register`, `POST /auth/login` and
//! `GET /users/profile`, backed by a single Postgres `users` table.
//!
//! Passwords are hashed with bcrypt before storage; successful registration
//! and login return a signed JWT carrying the user id (`sub`) and username.
//! Invalid credentials are reported uniformly so callers cannot tell whether
//! the username or the password was wrong.

pub mod cli;
pub mod janua;
