mod codes;
mod registry;
mod seed;
