#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod profile_tests;

#[cfg(test)]
mod rest_tests;

#[cfg(test)]
mod middleware_tests;
