mod choices;
mod field;
mod record;
