mod lifecycle;
mod views;
