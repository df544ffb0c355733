mod collection_loading;
mod normalization;
mod shop;
