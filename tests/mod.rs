mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the planner:
// - smoke_tests: The documented booking scenarios through the public API
// - slot_properties: Invariants swept over many windows and durations
