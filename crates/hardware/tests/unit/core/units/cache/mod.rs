//! Cache tests: behaviour against concrete and mocked memories, and properties
//! that must hold for every geometry.
