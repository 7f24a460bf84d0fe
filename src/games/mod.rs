pub mod peg_solitaire;
