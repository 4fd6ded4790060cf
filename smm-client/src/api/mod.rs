//! Ресурсные операции: тонкие обёртки над диспетчером `SmmClient::request`.
//!
//! Метод, путь и форма параметров у каждой операции фиксированы; клиентской
//! валидации нет, всё решает сервер.

mod ai_configs;
mod analytics;
mod auth;
mod characters;
mod content;
mod favorites;
mod providers;
mod system;
mod trends;
mod uploads;
mod video;
