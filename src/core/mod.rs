pub mod ledger_book;
