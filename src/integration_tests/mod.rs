mod repeatability;
mod scenarios;
