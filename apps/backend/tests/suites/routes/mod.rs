mod games;
mod health;
mod realtime;
